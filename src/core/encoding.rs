//! Binary encoding primitives shared by every resource record
//!
//! All layouts are positional and versionless:
//! - Integers and floats are fixed-width big-endian
//! - Strings and blobs are `[len: i32][bytes]`, the empty value is a zero length
//! - Sequences are `[count: i32]` followed by the elements
//!
//! Decoding checks the remaining input before every allocation, so a hostile
//! length prefix fails with `TruncatedInput` or `EncodingTooLarge` instead of
//! reserving memory.

use crate::error::{CodecError, Result};

/// Size of a length or count prefix on the wire
pub const LEN_PREFIX_SIZE: usize = 4;

/// Append-only big-endian writer
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn put_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a length or count prefix
    ///
    /// Fails with `EncodingTooLarge` if `len` does not fit an `i32`.
    pub fn put_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len).map_err(|_| CodecError::EncodingTooLarge(len as i64))?;
        self.put_i32(len);
        Ok(())
    }

    /// Write raw bytes with no prefix
    pub fn put_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Write a length-prefixed blob
    pub fn put_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.put_len(bytes.len())?;
        self.put_raw(bytes);
        Ok(())
    }

    /// Write a length-prefixed UTF-8 string
    pub fn put_str(&mut self, value: &str) -> Result<()> {
        self.put_bytes(value.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over a borrowed byte slice
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteReader { data, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    /// Borrow the next `len` bytes and advance past them
    pub fn get_raw(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(CodecError::TruncatedInput {
                needed: len,
                remaining: self.remaining(),
            });
        }

        let slice = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn get_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.get_raw(N)?);
        Ok(array)
    }

    pub fn get_i32(&mut self) -> Result<i32> {
        Ok(i32::from_be_bytes(self.get_array()?))
    }

    pub fn get_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.get_array()?))
    }

    pub fn get_f32(&mut self) -> Result<f32> {
        Ok(f32::from_be_bytes(self.get_array()?))
    }

    pub fn get_f64(&mut self) -> Result<f64> {
        Ok(f64::from_be_bytes(self.get_array()?))
    }

    /// Read a length prefix, rejecting negative values
    pub fn get_len(&mut self) -> Result<usize> {
        let len = self.get_i32()?;
        usize::try_from(len).map_err(|_| CodecError::EncodingTooLarge(len as i64))
    }

    /// Read a count of fixed-size elements
    ///
    /// The count is checked against the remaining input so that callers can
    /// preallocate `count` elements safely.
    pub fn get_count(&mut self, element_size: usize) -> Result<usize> {
        let count = self.get_len()?;
        let needed = count
            .checked_mul(element_size)
            .ok_or(CodecError::EncodingTooLarge(count as i64))?;

        if needed > self.remaining() {
            return Err(CodecError::TruncatedInput {
                needed,
                remaining: self.remaining(),
            });
        }

        Ok(count)
    }

    /// Read a length-prefixed blob
    pub fn get_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.get_len()?;
        Ok(self.get_raw(len)?.to_vec())
    }

    /// Read a length-prefixed UTF-8 string
    pub fn get_string(&mut self) -> Result<String> {
        Ok(String::from_utf8(self.get_bytes()?)?)
    }
}

/// A record with a fixed positional wire layout
pub trait WireRecord: Sized {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()>;

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self>;

    /// Serialize to a fresh buffer
    ///
    /// Encoding is all-or-nothing: on error no partial buffer is returned.
    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ByteWriter::new();
        self.encode(&mut writer)?;
        Ok(writer.finish())
    }

    /// Deserialize from the front of `data`, ignoring trailing bytes
    fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::decode(&mut ByteReader::new(data))
    }
}
