//! WAV generation result type.

use super::chunks::DataChunk;

/// Result of WAV file generation.
#[derive(Debug, Clone)]
pub struct WavResult {
    /// Complete WAV file bytes.
    pub wav_data: Vec<u8>,
    /// BLAKE3 hash of the `data` chunk payload only.
    pub pcm_hash: String,
    /// Sample-frame offset at which each source buffer starts.
    pub cue_offsets: Vec<u32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Total sample frames.
    pub num_frames: usize,
}

impl WavResult {
    pub(super) fn new(wav_data: Vec<u8>, data: &DataChunk, sample_rate: u32) -> Self {
        let pcm_hash = blake3::hash(data.samples()).to_hex().to_string();
        Self {
            wav_data,
            pcm_hash,
            cue_offsets: data.cue_offsets.clone(),
            sample_rate,
            num_frames: data.frames,
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_frames as f64 / f64::from(self.sample_rate)
    }
}
