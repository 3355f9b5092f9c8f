//! AIFF generation result type.

use super::chunks::SoundData;

/// Result of AIFF file generation.
#[derive(Debug, Clone)]
pub struct AiffResult {
    /// Complete AIFF file bytes.
    pub aiff_data: Vec<u8>,
    /// BLAKE3 hash of the sample bytes in `SSND`.
    pub pcm_hash: String,
    /// Sample-frame offset at which each source buffer starts.
    pub buffer_offsets: Vec<u32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Total sample frames.
    pub num_frames: u32,
}

impl AiffResult {
    pub(super) fn new(aiff_data: Vec<u8>, sound: &SoundData, sample_rate: u32) -> Self {
        Self {
            aiff_data,
            pcm_hash: blake3::hash(sound.samples()).to_hex().to_string(),
            buffer_offsets: sound.buffer_offsets.clone(),
            sample_rate,
            num_frames: sound.frames,
        }
    }

    /// Duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        f64::from(self.num_frames) / f64::from(self.sample_rate)
    }
}
