//! sample-packer container formats
//!
//! All output files are IFF-family containers: a sequence of tagged,
//! length-prefixed chunks wrapped by one outer chunk. This crate provides
//! the chunk writer and the two concrete containers the supported samplers
//! read.
//!
//! # Overview
//!
//! - [`chunk`] - [`Chunk`], a fixed-size chunk writer with compile-time byte
//!   order, and the outer wrapper assembly
//! - [`wav`] - Little-endian RIFF/WAVE with optional cue points marking
//!   where each concatenated source sample starts
//! - [`aiff`] - Big-endian FORM/AIFF with an optional application chunk for
//!   vendor metadata
//! - [`reader`] - Walks finished containers for inspection and tests
//!
//! # Example
//!
//! ```
//! use sample_packer_audio::SampleBuffer;
//! use sample_packer_formats::wav::{WavOptions, write_wav};
//!
//! let kick = SampleBuffer::mono(vec![0.5; 100], 44100).unwrap();
//! let snare = SampleBuffer::mono(vec![-0.5; 200], 44100).unwrap();
//!
//! let wav = write_wav(&[kick, snare], &WavOptions::default()).unwrap();
//! assert_eq!(&wav[0..4], b"RIFF");
//! ```

pub mod aiff;
pub mod chunk;
pub mod error;
pub mod reader;
pub mod wav;

pub use aiff::{write_aiff, AiffOptions, AiffResult, AiffWriter, ApplicationData};
pub use chunk::{Chunk, CHUNK_HEADER_LEN};
pub use error::{FormatError, FormatResult};
pub use reader::{inspect_container, read_container, ChunkInfo, ContainerInfo, ContainerKind};
pub use wav::{write_wav, WavOptions, WavResult, WavWriter};
