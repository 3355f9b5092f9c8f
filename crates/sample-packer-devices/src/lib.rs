//! sample-packer device encoders
//!
//! Turns decoded samples into the files specific hardware samplers load.
//! Each device module owns its slot layout, its metadata encoding and its
//! export, which produces an [`ExportBundle`] of named files.
//!
//! # Devices
//!
//! - [`op1`]: Teenage Engineering OP-1/OP-Z drum patch. One AIFF with every
//!   key's sample and a JSON parameter block in an `APPL` chunk
//! - [`microgranny`]: Bastl Microgranny preset. A bit-packed preset record
//!   plus one 22050 Hz WAV per sound
//! - [`squid`]: Squid Salmple bank. One cue-marked WAV per channel
//!
//! [`export`] drives any of them from a parsed manifest.
//!
//! # Example
//!
//! ```
//! use sample_packer_audio::SampleBuffer;
//! use sample_packer_devices::op1::{export_patch, Op1Patch};
//!
//! let mut patch = Op1Patch::new("kit");
//! patch.assign(0, SampleBuffer::mono(vec![0.5; 4410], 44100).unwrap()).unwrap();
//!
//! let bundle = export_patch(&patch).unwrap();
//! assert_eq!(bundle.files[0].path.to_str(), Some("kit.aif"));
//! ```

pub mod bundle;
pub mod error;
pub mod export;
pub mod microgranny;
pub mod op1;
pub mod squid;

pub use bundle::{ExportBundle, OutputFile, SkippedOutput};
pub use error::{DeviceError, DeviceResult};
pub use export::export_manifest;
pub use microgranny::{encode_preset, encode_record, Preset, PresetSlot, SoundName};
pub use op1::{build_metadata, key_timings, DrumPatch, Op1Patch};
pub use squid::SquidBank;
