//! Payload compression
//!
//! Provides the built-in compressors behind [`CompressionAlgorithm`].
//!
//! **Design**:
//! - LZW, LSB-first bit packing, 8-bit literals, codes grow from 9 to 12 bits
//! - A clear code is emitted first; the stream ends with an end-of-information code
//! - The empty input compresses to an empty payload
//! - Decompression always yields exactly `original_len` bytes. A damaged
//!   stream stops decoding early and leaves the remainder zeroed, so the
//!   damage surfaces as a hash mismatch in the integrity check

use crate::algorithm::CompressionAlgorithm;
use crate::error::{CodecError, Result};
use tracing::warn;
use weezl::{decode::Decoder, encode::Encoder, BitOrder, LzwStatus};

/// LZW literal width in bits
pub const LZW_LITERAL_WIDTH: u8 = 8;

/// Longest dictionary string a single LZW code can stand for
const LZW_MAX_STRING_LEN: usize = 1 << 12;

/// Compress data using the specified algorithm
pub fn compress(data: &[u8], algorithm: CompressionAlgorithm) -> Result<Vec<u8>> {
    match algorithm {
        CompressionAlgorithm::LzwLsb8 => compress_lzw_lsb8(data),
    }
}

/// Decompress data to exactly `original_len` bytes using the specified algorithm
pub fn decompress(
    data: &[u8],
    original_len: usize,
    algorithm: CompressionAlgorithm,
) -> Result<Vec<u8>> {
    match algorithm {
        CompressionAlgorithm::LzwLsb8 => decompress_lzw_lsb8(data, original_len),
    }
}

/// Upper bound on the output a payload can decompress to
///
/// Used to reject stored lengths before a buffer of that size is allocated.
pub fn max_decompressed_len(payload_len: usize, algorithm: CompressionAlgorithm) -> usize {
    match algorithm {
        // Every code is at least 9 bits wide
        CompressionAlgorithm::LzwLsb8 => {
            (payload_len.saturating_mul(8) / 9).saturating_mul(LZW_MAX_STRING_LEN)
        }
    }
}

/// LZW compression with LSB order and 8-bit literal width
pub fn compress_lzw_lsb8(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    Encoder::new(BitOrder::Lsb, LZW_LITERAL_WIDTH)
        .encode(data)
        .map_err(|e| CodecError::Compression(format!("LZW compression failed: {}", e)))
}

/// LZW decompression with LSB order and 8-bit literal width
pub fn decompress_lzw_lsb8(data: &[u8], original_len: usize) -> Result<Vec<u8>> {
    let mut output = vec![0u8; original_len];
    let mut decoder = Decoder::new(BitOrder::Lsb, LZW_LITERAL_WIDTH);
    let mut input = data;
    let mut filled = 0;

    while filled < original_len {
        let result = decoder.decode_bytes(input, &mut output[filled..]);
        input = &input[result.consumed_in..];
        filled += result.consumed_out;

        match result.status {
            Ok(LzwStatus::Ok) if result.consumed_in > 0 || result.consumed_out > 0 => {}
            Ok(_) => break,
            Err(e) => {
                warn!(
                    decoded = filled,
                    expected = original_len,
                    "LZW stream damaged: {}",
                    e
                );
                break;
            }
        }
    }

    if filled < original_len {
        warn!(
            decoded = filled,
            expected = original_len,
            "LZW stream ended before the original length"
        );
    }

    Ok(output)
}
