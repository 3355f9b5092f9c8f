//! RIFF/WAVE writer.
//!
//! Writes mono PCM WAV files built from one or more source buffers laid end
//! to end in a single `data` chunk. A `cue ` chunk records the frame at
//! which each source starts so samplers can slice the file back apart.

mod chunks;
mod format;
mod result;
mod writer;


/// MIME type of WAV output.
pub const WAV_MIME: &str = "audio/wav";

/// Size of one cue point record.
pub const CUE_POINT_LEN: usize = 24;

pub use chunks::{cue_chunk, data_chunk, format_chunk, DataChunk};
pub use format::{WavFormat, WavOptions};
pub use result::WavResult;
pub use writer::{write_wav, WavWriter};
