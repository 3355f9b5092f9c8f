//! sample-packer audio preprocessing
//!
//! Everything that happens to decoded audio before it is laid out in a
//! container file:
//!
//! - [`buffer`] - [`SampleBuffer`], a decoded multi-channel float buffer with
//!   in-place downmix and resample
//! - [`pcm`] - Quantization of float samples to signed integers
//! - [`resample`] - Linear-interpolation sample rate conversion
//! - [`decode`] - The [`Decoder`] capability and a WAV implementation
//! - [`slots`] - [`SlotList`], the ordered slot container devices are built on
//!
//! # Example
//!
//! ```
//! use sample_packer_audio::SampleBuffer;
//! use sample_packer_spec::BitDepth;
//!
//! let mut buffer = SampleBuffer::from_channels(
//!     vec![vec![1.0, -1.0, 0.5], vec![1.0, -1.0, -0.5]],
//!     48000,
//! )
//! .unwrap();
//!
//! buffer.convert_to_mono();
//! buffer.resample(44100).unwrap();
//! assert_eq!(buffer.channel_count(), 1);
//! assert_eq!(buffer.quantize(0, 0, BitDepth::Sixteen).unwrap(), 32767);
//! ```

pub mod buffer;
pub mod decode;
pub mod error;
pub mod pcm;
pub mod resample;
pub mod slots;

pub use buffer::SampleBuffer;
pub use decode::{Decoder, WavDecoder};
pub use error::{AudioError, AudioResult};
pub use pcm::quantize_sample;
pub use slots::SlotList;
