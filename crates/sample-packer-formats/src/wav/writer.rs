//! WAV container assembly.

use sample_packer_audio::SampleBuffer;

use super::chunks::{cue_chunk, data_chunk, format_chunk, DataChunk};
use super::format::WavOptions;
use super::result::WavResult;
use crate::chunk::{assemble, LittleEndian};
use crate::error::FormatResult;

/// Writes a complete WAV file.
///
/// Chunks are built in order `fmt `, `data`, then `cue ` when cue points are
/// enabled and at least one buffer exists. The `RIFF` length is the inner
/// chunk total plus 4 for the `WAVE` form type.
///
/// # Arguments
/// * `buffers` - Source buffers, all at `options.sample_rate`
/// * `options` - Sample rate, bit depth and cue settings
///
/// # Returns
/// Complete WAV file bytes
pub fn write_wav(buffers: &[SampleBuffer], options: &WavOptions) -> FormatResult<Vec<u8>> {
    build(buffers, options).map(|(bytes, _)| bytes)
}

pub(super) fn build(
    buffers: &[SampleBuffer],
    options: &WavOptions,
) -> FormatResult<(Vec<u8>, DataChunk)> {
    let format = options.format();

    let mut chunks = vec![format_chunk(&format)?];
    let data = data_chunk(buffers, &format)?;
    chunks.push(data.bytes.clone());
    if options.cue_points && !buffers.is_empty() {
        chunks.push(cue_chunk(&data.cue_offsets)?);
    }

    let wav = assemble::<LittleEndian>(b"RIFF", b"WAVE", &chunks, |len| {
        u32::try_from(len).ok()?.checked_add(4)
    })?;
    Ok((wav, data))
}

/// WAV writer with fixed options.
#[derive(Debug, Clone, Default)]
pub struct WavWriter {
    options: WavOptions,
}

impl WavWriter {
    /// Creates a writer with the given options.
    pub fn new(options: WavOptions) -> Self {
        Self { options }
    }

    /// Writes `buffers` to WAV bytes.
    pub fn write(&self, buffers: &[SampleBuffer]) -> FormatResult<Vec<u8>> {
        write_wav(buffers, &self.options)
    }

    /// Writes `buffers` and returns the file with its cue offsets and PCM hash.
    pub fn write_result(&self, buffers: &[SampleBuffer]) -> FormatResult<WavResult> {
        let (wav_data, data) = build(buffers, &self.options)?;
        Ok(WavResult::new(wav_data, &data, self.options.sample_rate))
    }
}
