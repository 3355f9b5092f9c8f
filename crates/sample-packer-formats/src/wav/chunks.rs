//! Builders for the chunks inside a WAV file.

use sample_packer_audio::{quantize_sample, SampleBuffer};
use sample_packer_spec::BitDepth;

use super::format::WavFormat;
use super::CUE_POINT_LEN;
use crate::chunk::{Chunk, LittleEndian, CHUNK_HEADER_LEN};
use crate::error::{FormatError, FormatResult};

/// PCM compression code.
const FORMAT_PCM: u16 = 1;

/// Builds the 16-byte `fmt ` chunk.
pub fn format_chunk(format: &WavFormat) -> FormatResult<Vec<u8>> {
    let mut chunk = Chunk::<LittleEndian>::new(b"fmt ", 16);
    chunk.put_u16(FORMAT_PCM)?;
    chunk.put_u16(format.channels)?;
    chunk.put_u32(format.sample_rate)?;
    chunk.put_u32(format.byte_rate())?;
    chunk.put_u16(format.block_align())?;
    chunk.put_u16(format.bit_depth.bits())?;
    chunk.finish()
}

/// A finished `data` chunk plus the frame offset at which each source
/// buffer starts.
#[derive(Debug, Clone)]
pub struct DataChunk {
    /// Chunk bytes, header and pad byte included.
    pub bytes: Vec<u8>,
    /// Payload length declared in the header.
    pub payload_len: usize,
    /// Sample-frame offset of each source buffer, in order.
    pub cue_offsets: Vec<u32>,
    /// Total sample frames written.
    pub frames: usize,
}

/// Builds the `data` chunk: every buffer downmixed to mono, quantized and
/// concatenated.
///
/// 16-bit samples are signed; 8-bit samples are stored unsigned with a
/// 128 offset, as RIFF requires. An odd-length payload is followed by one
/// zero pad byte that the declared length does not count.
pub fn data_chunk(buffers: &[SampleBuffer], format: &WavFormat) -> FormatResult<DataChunk> {
    let bytes_per_sample = usize::from(format.bytes_per_sample());
    let frames: usize = buffers.iter().map(SampleBuffer::frames).sum();
    let payload_len = frames * bytes_per_sample;
    let mut chunk = Chunk::<LittleEndian>::sized(b"data", payload_len)?;

    let mut cue_offsets = Vec::with_capacity(buffers.len());
    for (index, buffer) in buffers.iter().enumerate() {
        if buffer.sample_rate() != format.sample_rate {
            return Err(FormatError::SampleRateMismatch {
                index,
                expected: format.sample_rate,
                found: buffer.sample_rate(),
            });
        }

        // frame offset, not byte offset
        let frame = (chunk.position() - CHUNK_HEADER_LEN) / bytes_per_sample;
        let frame = u32::try_from(frame).map_err(|_| FormatError::TooLarge { bytes: frame })?;
        cue_offsets.push(frame);

        for &sample in buffer.mono_samples().iter() {
            let value = quantize_sample(sample, format.bit_depth);
            match format.bit_depth {
                BitDepth::Eight => chunk.put_u8((value + 128) as u8)?,
                BitDepth::Sixteen => chunk.put_i16(value as i16)?,
            }
        }
    }

    let mut bytes = chunk.finish()?;
    if payload_len % 2 == 1 {
        bytes.push(0);
    }

    Ok(DataChunk {
        bytes,
        payload_len,
        cue_offsets,
        frames,
    })
}

impl DataChunk {
    /// Quantized sample bytes, without header or pad byte.
    pub fn samples(&self) -> &[u8] {
        &self.bytes[CHUNK_HEADER_LEN..CHUNK_HEADER_LEN + self.payload_len]
    }
}

/// Builds the `cue ` chunk: a point count followed by one 24-byte cue point
/// per offset.
///
/// Each point uses its 1-based index as both name and play order, refers to
/// the `data` chunk, and leaves the playlist chunk/block start fields zero.
pub fn cue_chunk(offsets: &[u32]) -> FormatResult<Vec<u8>> {
    let count = u32::try_from(offsets.len()).map_err(|_| FormatError::TooLarge {
        bytes: offsets.len(),
    })?;
    let mut chunk = Chunk::<LittleEndian>::sized(b"cue ", 4 + CUE_POINT_LEN * offsets.len())?;

    chunk.put_u32(count)?;
    for (id, &offset) in (1u32..).zip(offsets) {
        chunk.put_u32(id)?; // name
        chunk.put_u32(id)?; // play order
        chunk.put_str("data")?;
        chunk.put_u32(0)?; // chunk start
        chunk.put_u32(0)?; // block start
        chunk.put_u32(offset)?;
    }
    chunk.finish()
}
