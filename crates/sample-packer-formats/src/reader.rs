//! Chunk walker for finished containers.
//!
//! Walks the chunk list of a RIFF or FORM file without interpreting chunk
//! payloads. The outer length field is reported as written and not trusted
//! for bounds: chunks are read until the input ends.

use std::ops::Range;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::chunk::CHUNK_HEADER_LEN;
use crate::error::{FormatError, FormatResult};

/// Container families this crate writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// Little-endian `RIFF`/`WAVE`.
    Wav,
    /// Big-endian `FORM`/`AIFF`.
    Aiff,
}

impl ContainerKind {
    /// Detects the container from its first 12 bytes.
    pub fn detect(bytes: &[u8]) -> Option<Self> {
        match (bytes.get(0..4)?, bytes.get(8..12)?) {
            (b"RIFF", b"WAVE") => Some(Self::Wav),
            (b"FORM", b"AIFF") => Some(Self::Aiff),
            _ => None,
        }
    }

    /// Short lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Aiff => "aiff",
        }
    }
}

/// One chunk found in a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkInfo {
    /// Chunk tag.
    pub tag: [u8; 4],
    /// Payload length from the chunk header.
    pub declared_len: u32,
    /// Byte offset of the chunk header within the file.
    pub offset: usize,
}

impl ChunkInfo {
    /// Tag as text.
    pub fn tag_str(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }

    /// Byte range of the payload within the file.
    pub fn payload_range(&self) -> Range<usize> {
        let start = self.offset + CHUNK_HEADER_LEN;
        start..start + self.declared_len as usize
    }
}

/// Parsed container layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Detected container kind, if the wrapper is one this crate writes.
    pub kind: Option<ContainerKind>,
    /// Wrapper tag (`RIFF`, `FORM`).
    pub outer_tag: [u8; 4],
    /// Length field of the wrapper, as written.
    pub declared_len: u32,
    /// Form type following the wrapper header (`WAVE`, `AIFF`).
    pub form_type: [u8; 4],
    /// Inner chunks in file order.
    pub chunks: Vec<ChunkInfo>,
}

impl ContainerInfo {
    /// First chunk with the given tag.
    pub fn find(&self, tag: &[u8; 4]) -> Option<&ChunkInfo> {
        self.chunks.iter().find(|c| &c.tag == tag)
    }

    /// Payload bytes of the first chunk with the given tag.
    pub fn payload<'a>(&self, bytes: &'a [u8], tag: &[u8; 4]) -> Option<&'a [u8]> {
        self.find(tag).and_then(|c| bytes.get(c.payload_range()))
    }
}

/// Walks a container using byte order `B` for all length fields.
///
/// Odd-length chunks are followed by a pad byte when more data follows.
/// A chunk header or payload cut short by the end of input is an error.
pub fn read_container<B: ByteOrder>(bytes: &[u8]) -> FormatResult<ContainerInfo> {
    if bytes.len() < CHUNK_HEADER_LEN + 4 {
        return Err(FormatError::malformed(format!(
            "{} bytes is too short for a container header",
            bytes.len()
        )));
    }

    let outer_tag = tag_at(bytes, 0);
    let declared_len = B::read_u32(&bytes[4..8]);
    let form_type = tag_at(bytes, 8);

    let mut chunks = Vec::new();
    let mut offset = CHUNK_HEADER_LEN + 4;
    while offset < bytes.len() {
        if bytes.len() - offset < CHUNK_HEADER_LEN {
            return Err(FormatError::malformed(format!(
                "truncated chunk header at offset {offset}"
            )));
        }
        let chunk = ChunkInfo {
            tag: tag_at(bytes, offset),
            declared_len: B::read_u32(&bytes[offset + 4..offset + 8]),
            offset,
        };
        let end = chunk.payload_range().end;
        if end > bytes.len() {
            return Err(FormatError::malformed(format!(
                "chunk '{}' at offset {} declares {} bytes, only {} remain",
                chunk.tag_str(),
                offset,
                chunk.declared_len,
                bytes.len() - offset - CHUNK_HEADER_LEN
            )));
        }
        offset = end;
        if chunk.declared_len % 2 == 1 && offset < bytes.len() {
            offset += 1;
        }
        chunks.push(chunk);
    }

    Ok(ContainerInfo {
        kind: ContainerKind::detect(bytes),
        outer_tag,
        declared_len,
        form_type,
        chunks,
    })
}

/// Detects the container kind and walks it with the matching byte order.
pub fn inspect_container(bytes: &[u8]) -> FormatResult<ContainerInfo> {
    match ContainerKind::detect(bytes) {
        Some(ContainerKind::Wav) => read_container::<LittleEndian>(bytes),
        Some(ContainerKind::Aiff) => read_container::<BigEndian>(bytes),
        None => Err(FormatError::malformed("not a RIFF/WAVE or FORM/AIFF file")),
    }
}

fn tag_at(bytes: &[u8], offset: usize) -> [u8; 4] {
    [
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ]
}
