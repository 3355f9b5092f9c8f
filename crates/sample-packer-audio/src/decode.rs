//! Decoding raw file bytes into sample buffers.
//!
//! Decoding arbitrary containers is an external capability; the encoders
//! only need something implementing [`Decoder`]. [`WavDecoder`] covers the
//! RIFF/WAVE inputs the CLI accepts.

use std::io::Cursor;
use std::path::Path;

use crate::buffer::SampleBuffer;
use crate::error::{AudioError, AudioResult};

/// Turns raw file bytes into a decoded float buffer.
pub trait Decoder {
    /// Decodes `bytes`, failing with [`AudioError::Decode`] when the input is
    /// unsupported or corrupt.
    fn decode(&self, bytes: &[u8]) -> AudioResult<SampleBuffer>;

    /// Reads and decodes a file.
    fn decode_file(&self, path: &Path) -> AudioResult<SampleBuffer> {
        let bytes = std::fs::read(path)?;
        self.decode(&bytes)
    }
}

/// WAV decoder backed by `hound`.
///
/// Accepts 8/16/24/32-bit integer PCM and 32-bit float PCM with any channel
/// count. Integer samples are normalized by `2^(bits - 1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl Decoder for WavDecoder {
    fn decode(&self, bytes: &[u8]) -> AudioResult<SampleBuffer> {
        let reader = hound::WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();

        let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
            (hound::SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
                let scale = (1u64 << (bits - 1)) as f64;
                reader
                    .into_samples::<i32>()
                    .map(|s| s.map(|v| (f64::from(v) / scale) as f32))
                    .collect::<Result<_, _>>()?
            }
            (hound::SampleFormat::Float, 32) => {
                reader.into_samples::<f32>().collect::<Result<_, _>>()?
            }
            (format, bits) => {
                return Err(AudioError::decode(format!(
                    "unsupported WAV sample format: {:?} {}-bit",
                    format, bits
                )));
            }
        };

        log::debug!(
            "decoded WAV: {} ch, {} Hz, {}-bit, {} samples",
            spec.channels,
            spec.sample_rate,
            spec.bits_per_sample,
            interleaved.len()
        );

        SampleBuffer::from_interleaved(&interleaved, usize::from(spec.channels), spec.sample_rate)
    }
}
