//! Bounds-checked cursor over a flat, little-endian configuration image
//!
//! The image is a sequence of 32-bit words. Tables pack 16-bit fields two to a
//! word and pad odd-length entry runs back to a word boundary, so the reader
//! and writer both expose explicit word alignment.

use crate::{
    error::{LutError, MalformedReason, Result},
    table::{DecayTable, MAX_LUT_SIZE},
};

/// Size of one image word in bytes
pub const WORD_BYTES: usize = 4;

/// Round `len` up to a whole number of words
#[inline]
pub const fn word_aligned(len: usize) -> usize {
    (len + WORD_BYTES - 1) & !(WORD_BYTES - 1)
}

/// Read-only cursor over an image
///
/// The cursor only moves forward. Every read checks the remaining length
/// first and reports `TruncatedImage` instead of reading past the end.
#[derive(Debug, Clone)]
pub struct ImageReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ImageReader<'a> {
    /// Cursor at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Cursor at `offset` into `data`
    pub fn at(data: &'a [u8], offset: usize) -> Result<Self> {
        if offset > data.len() {
            return Err(LutError::truncated(offset, 0, 0));
        }
        Ok(Self { data, offset })
    }

    /// Current byte offset from the start of the image
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Take the next `len` bytes
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(LutError::truncated(self.offset, len, available));
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Read a little-endian `u16`
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Skip forward to the next word boundary, relative to the image start
    pub fn align_to_word(&mut self) -> Result<()> {
        let padding = word_aligned(self.offset) - self.offset;
        self.read_bytes(padding).map(|_| ())
    }

    /// Read one self-sized decay table and leave the cursor on the next word
    ///
    /// The whole table, padding included, is bounds-checked before any entry
    /// is copied, so a short image never yields a partial table.
    pub fn read_table(&mut self) -> Result<DecayTable> {
        let start = self.offset;
        let size = self.read_u16()? as usize;
        let shift = self.read_u16()?;

        if size > MAX_LUT_SIZE {
            self.offset = start;
            return Err(LutError::malformed(MalformedReason::Oversized {
                declared: size,
                capacity: MAX_LUT_SIZE,
            }));
        }

        let body = word_aligned(size * 2);
        let available = self.remaining();
        if body > available {
            self.offset = start;
            return Err(LutError::truncated(start + WORD_BYTES, body, available));
        }

        let bytes = self.read_bytes(body)?;
        let mut raw = [0i16; MAX_LUT_SIZE];
        for (slot, pair) in raw[..size].iter_mut().zip(bytes.chunks_exact(2)) {
            *slot = i16::from_le_bytes([pair[0], pair[1]]);
        }
        DecayTable::with_shift(&raw[..size], shift)
    }
}

/// Builder for images in the layout `ImageReader` consumes
///
/// Host-side only: the device never writes images, but fixtures, generators
/// and checkpoint tooling do.
#[derive(Debug, Default, Clone)]
pub struct ImageWriter {
    bytes: Vec<u8>,
}

impl ImageWriter {
    /// Empty image
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when nothing has been written
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Append raw bytes
    pub fn write_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Append a little-endian `u16`
    pub fn write_u16(&mut self, value: u16) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Append a little-endian `u32`
    pub fn write_u32(&mut self, value: u32) -> &mut Self {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Zero-pad to the next word boundary
    pub fn pad_to_word(&mut self) -> &mut Self {
        let target = word_aligned(self.bytes.len());
        self.bytes.resize(target, 0);
        self
    }

    /// Append a table header and entries without validating them
    pub fn write_raw_table(&mut self, shift: u16, entries: &[i16]) -> &mut Self {
        self.write_u16(entries.len() as u16).write_u16(shift);
        for entry in entries {
            self.write_bytes(&entry.to_le_bytes());
        }
        self.pad_to_word()
    }

    /// Append a table
    pub fn write_table(&mut self, table: &DecayTable) -> &mut Self {
        self.write_raw_table(table.shift(), table.entries())
    }

    /// Finished image
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}
