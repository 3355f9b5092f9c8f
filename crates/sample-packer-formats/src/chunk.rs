//! IFF chunk writer.
//!
//! A chunk is a 4-byte ASCII tag, a 4-byte payload length and exactly that
//! many payload bytes. [`Chunk`] is created with its final payload length,
//! writes tag and length immediately, and then accepts typed appends until
//! the payload is full. Byte order is a type parameter: big-endian unless a
//! format opts into [`LittleEndian`].

use std::marker::PhantomData;

use byteorder::{BigEndian, ByteOrder};

use crate::error::{FormatError, FormatResult};

#[doc(no_inline)]
pub use byteorder::LittleEndian;

/// Size of a chunk header (tag + length).
pub const CHUNK_HEADER_LEN: usize = 8;

/// Fixed-size chunk under construction.
#[derive(Debug, Clone)]
pub struct Chunk<B: ByteOrder = BigEndian> {
    tag: [u8; 4],
    declared: u32,
    payload_len: usize,
    bytes: Vec<u8>,
    _order: PhantomData<B>,
}

impl<B: ByteOrder> Chunk<B> {
    /// Starts a chunk whose payload will be exactly `length` bytes.
    pub fn new(tag: &[u8; 4], length: u32) -> Self {
        Self::with_header(tag, length, length as usize)
    }

    /// Starts a chunk sized for a payload of `length` bytes, failing if it
    /// does not fit the 32-bit length field.
    pub fn sized(tag: &[u8; 4], length: usize) -> FormatResult<Self> {
        let declared = u32::try_from(length).map_err(|_| FormatError::TooLarge { bytes: length })?;
        Ok(Self::new(tag, declared))
    }

    /// Header declares `declared`, but only `payload_len` bytes follow in
    /// this chunk's own buffer. Used for outer wrappers whose length field
    /// covers the inner chunks appended after it.
    fn with_header(tag: &[u8; 4], declared: u32, payload_len: usize) -> Self {
        let mut bytes = Vec::with_capacity(CHUNK_HEADER_LEN + payload_len);
        bytes.extend_from_slice(tag);
        let mut length = [0u8; 4];
        B::write_u32(&mut length, declared);
        bytes.extend_from_slice(&length);

        Self {
            tag: *tag,
            declared,
            payload_len,
            bytes,
            _order: PhantomData,
        }
    }

    /// Chunk tag.
    pub fn tag(&self) -> &[u8; 4] {
        &self.tag
    }

    /// Length written in the header.
    pub fn declared_len(&self) -> u32 {
        self.declared
    }

    /// Total size of the finished chunk, header included.
    pub fn byte_len(&self) -> usize {
        CHUNK_HEADER_LEN + self.payload_len
    }

    /// Write cursor, counted from the start of the header.
    pub fn position(&self) -> usize {
        self.bytes.len()
    }

    /// Payload bytes still to be written.
    pub fn remaining(&self) -> usize {
        self.byte_len() - self.bytes.len()
    }

    /// Appends raw bytes.
    pub fn put_bytes(&mut self, data: &[u8]) -> FormatResult<()> {
        if data.len() > self.remaining() {
            return Err(FormatError::ChunkOverflow {
                tag: self.tag_string(),
                declared: self.declared,
                attempted: self.bytes.len() - CHUNK_HEADER_LEN + data.len(),
            });
        }
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    /// Appends an unsigned byte.
    pub fn put_u8(&mut self, value: u8) -> FormatResult<()> {
        self.put_bytes(&[value])
    }

    /// Appends an unsigned 16-bit integer in the chunk's byte order.
    pub fn put_u16(&mut self, value: u16) -> FormatResult<()> {
        let mut buf = [0u8; 2];
        B::write_u16(&mut buf, value);
        self.put_bytes(&buf)
    }

    /// Appends a signed 16-bit integer in the chunk's byte order.
    pub fn put_i16(&mut self, value: i16) -> FormatResult<()> {
        let mut buf = [0u8; 2];
        B::write_i16(&mut buf, value);
        self.put_bytes(&buf)
    }

    /// Appends an unsigned 32-bit integer in the chunk's byte order.
    pub fn put_u32(&mut self, value: u32) -> FormatResult<()> {
        let mut buf = [0u8; 4];
        B::write_u32(&mut buf, value);
        self.put_bytes(&buf)
    }

    /// Appends a string, one byte per character (code points above 0xFF are
    /// truncated to their low byte).
    pub fn put_str(&mut self, value: &str) -> FormatResult<()> {
        if value.chars().count() > self.remaining() {
            return Err(FormatError::ChunkOverflow {
                tag: self.tag_string(),
                declared: self.declared,
                attempted: self.bytes.len() - CHUNK_HEADER_LEN + value.chars().count(),
            });
        }
        for c in value.chars() {
            self.put_u8(c as u32 as u8)?;
        }
        Ok(())
    }

    /// Finishes the chunk, failing if any payload byte is unwritten.
    pub fn finish(self) -> FormatResult<Vec<u8>> {
        if self.remaining() != 0 {
            return Err(FormatError::ChunkIncomplete {
                tag: self.tag_string(),
                declared: self.declared,
                written: self.bytes.len() - CHUNK_HEADER_LEN,
            });
        }
        Ok(self.bytes)
    }

    fn tag_string(&self) -> String {
        String::from_utf8_lossy(&self.tag).into_owned()
    }
}

/// Assembles a container: the outer wrapper chunk followed by `inner`.
///
/// The wrapper's length field is computed from the finished inner chunks by
/// `declared_len`, which receives their total byte size. The wrapper payload
/// itself is only the 4-byte form type.
///
/// # Arguments
/// * `outer_tag` - Wrapper tag (`RIFF`, `FORM`)
/// * `form_type` - Form type written right after the wrapper header (`WAVE`, `AIFF`)
/// * `inner` - Finished inner chunks in file order
/// * `declared_len` - Maps the inner total size to the wrapper's length field
pub fn assemble<B: ByteOrder>(
    outer_tag: &[u8; 4],
    form_type: &[u8; 4],
    inner: &[Vec<u8>],
    declared_len: impl FnOnce(usize) -> Option<u32>,
) -> FormatResult<Vec<u8>> {
    let inner_len: usize = inner.iter().map(Vec::len).sum();
    let declared = declared_len(inner_len).ok_or(FormatError::TooLarge { bytes: inner_len })?;

    let mut wrapper = Chunk::<B>::with_header(outer_tag, declared, form_type.len());
    wrapper.put_bytes(form_type)?;

    let mut out = Vec::with_capacity(wrapper.byte_len() + inner_len);
    out.extend(wrapper.finish()?);
    for chunk in inner {
        out.extend_from_slice(chunk);
    }

    log::debug!(
        "assembled {} container: {} inner chunks, {} bytes, declared length {}",
        String::from_utf8_lossy(outer_tag),
        inner.len(),
        out.len(),
        declared
    );
    Ok(out)
}
