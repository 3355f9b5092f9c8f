//! FORM/AIFF writer.
//!
//! Writes mono 16-bit big-endian AIFF files. Source buffers are laid end to
//! end in one `SSND` chunk, and an optional `APPL` chunk carries
//! vendor-specific metadata after the sound data.

mod chunks;
mod extended;
mod result;
mod writer;

#[cfg(test)]
mod tests;

/// MIME type of AIFF output.
pub const AIFF_MIME: &str = "audio/aiff";

pub use chunks::{application_chunk, common_chunk, sound_data_chunk, ApplicationData, SoundData};
pub use extended::{extended_sample_rate, read_extended};
pub use result::AiffResult;
pub use writer::{write_aiff, AiffOptions, AiffWriter};
