//! Blob lists
//!
//! A blob list is a bare concatenation of length-prefixed blobs with no
//! count; the end of the input ends the list.

use crate::encoding::{ByteReader, ByteWriter};
use crate::error::Result;

pub fn serialize_blobs<B: AsRef<[u8]>>(blobs: &[B]) -> Result<Vec<u8>> {
    let mut writer = ByteWriter::new();
    for blob in blobs {
        writer.put_bytes(blob.as_ref())?;
    }
    Ok(writer.finish())
}

/// Split a blob list
///
/// # Errors
///
/// Returns `TruncatedInput` if the last blob is cut short.
pub fn deserialize_blobs(data: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut reader = ByteReader::new(data);
    let mut blobs = Vec::new();

    while !reader.is_empty() {
        blobs.push(reader.get_bytes()?);
    }

    Ok(blobs)
}
