//! WAV format parameters.

use sample_packer_spec::BitDepth;

/// Parameters of the `fmt ` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Number of channels (always 1: sources are downmixed).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bits per sample.
    pub bit_depth: BitDepth,
}

impl WavFormat {
    /// Creates a mono format.
    pub fn mono(sample_rate: u32, bit_depth: BitDepth) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bit_depth,
        }
    }

    /// Bytes per sample (per channel).
    pub fn bytes_per_sample(&self) -> u16 {
        self.bit_depth.bits() / 8
    }

    /// Bytes per sample frame.
    pub fn block_align(&self) -> u16 {
        self.channels * self.bytes_per_sample()
    }

    /// Bytes per second.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.block_align())
    }
}

/// Options for writing a WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavOptions {
    /// Sample rate every source buffer must already have.
    pub sample_rate: u32,
    /// Output bit depth.
    pub bit_depth: BitDepth,
    /// Emit a `cue ` chunk marking the start of each source buffer.
    pub cue_points: bool,
}

impl Default for WavOptions {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            bit_depth: BitDepth::Sixteen,
            cue_points: true,
        }
    }
}

impl WavOptions {
    /// Format parameters for these options.
    pub fn format(&self) -> WavFormat {
        WavFormat::mono(self.sample_rate, self.bit_depth)
    }
}
