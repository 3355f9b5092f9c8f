//! Builders for the chunks inside an AIFF file.

use byteorder::BigEndian;
use sample_packer_audio::{quantize_sample, SampleBuffer};
use sample_packer_spec::BitDepth;

use super::extended::extended_sample_rate;
use crate::chunk::{Chunk, CHUNK_HEADER_LEN};
use crate::error::{FormatError, FormatResult};

/// Bytes before the samples in `SSND`: offset and block size.
const SOUND_DATA_PREAMBLE: usize = 8;

/// Vendor metadata stored in an `APPL` chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationData {
    signature: [u8; 4],
    data: Vec<u8>,
}

impl ApplicationData {
    /// Creates application data, failing unless `signature` is exactly four
    /// ASCII characters.
    pub fn new(signature: &str, data: Vec<u8>) -> FormatResult<Self> {
        let bytes = signature.as_bytes();
        let signature = match <[u8; 4]>::try_from(bytes) {
            Ok(sig) if sig.is_ascii() => sig,
            _ => {
                return Err(FormatError::InvalidSignature {
                    signature: signature.to_string(),
                })
            }
        };
        Ok(Self { signature, data })
    }

    /// Four-byte application signature.
    pub fn signature(&self) -> &[u8; 4] {
        &self.signature
    }

    /// Application payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// Builds the 18-byte `COMM` chunk for mono 16-bit audio.
pub fn common_chunk(frames: u32, sample_rate: u32) -> FormatResult<Vec<u8>> {
    let rate = extended_sample_rate(sample_rate)?;
    let mut chunk = Chunk::<BigEndian>::new(b"COMM", 18);
    chunk.put_u16(1)?;
    chunk.put_u32(frames)?;
    chunk.put_u16(BitDepth::Sixteen.bits())?;
    chunk.put_bytes(&rate)?;
    chunk.finish()
}

/// A finished `SSND` chunk plus where each source buffer starts.
#[derive(Debug, Clone)]
pub struct SoundData {
    /// Chunk bytes, header included.
    pub bytes: Vec<u8>,
    /// Sample-frame offset of each source buffer, in order.
    pub buffer_offsets: Vec<u32>,
    /// Total sample frames written.
    pub frames: u32,
}

impl SoundData {
    /// Sample bytes, without header, offset and block size.
    pub fn samples(&self) -> &[u8] {
        &self.bytes[CHUNK_HEADER_LEN + SOUND_DATA_PREAMBLE..]
    }
}

/// Builds the `SSND` chunk: zero offset and block size, then every buffer
/// downmixed and quantized to signed 16-bit big-endian, concatenated.
pub fn sound_data_chunk(buffers: &[SampleBuffer], sample_rate: u32) -> FormatResult<SoundData> {
    let total: usize = buffers.iter().map(SampleBuffer::frames).sum();
    let frames = u32::try_from(total).map_err(|_| FormatError::TooLarge { bytes: total })?;
    let mut chunk = Chunk::<BigEndian>::sized(b"SSND", SOUND_DATA_PREAMBLE + total * 2)?;
    chunk.put_u32(0)?;
    chunk.put_u32(0)?;

    let mut buffer_offsets = Vec::with_capacity(buffers.len());
    let mut written = 0u32;
    for (index, buffer) in buffers.iter().enumerate() {
        if buffer.sample_rate() != sample_rate {
            return Err(FormatError::SampleRateMismatch {
                index,
                expected: sample_rate,
                found: buffer.sample_rate(),
            });
        }
        buffer_offsets.push(written);
        let mono = buffer.mono_samples();
        for &sample in mono.iter() {
            chunk.put_i16(quantize_sample(sample, BitDepth::Sixteen) as i16)?;
        }
        // bounded by `frames`, which already fit a u32
        written += mono.len() as u32;
    }

    Ok(SoundData {
        bytes: chunk.finish()?,
        buffer_offsets,
        frames,
    })
}

/// Builds the `APPL` chunk: signature then payload, no pad byte.
pub fn application_chunk(app: &ApplicationData) -> FormatResult<Vec<u8>> {
    let mut chunk = Chunk::<BigEndian>::sized(b"APPL", app.signature.len() + app.data.len())?;
    chunk.put_bytes(&app.signature)?;
    chunk.put_bytes(&app.data)?;
    chunk.finish()
}
