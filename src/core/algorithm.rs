//! Algorithm and pixel format identifiers
//!
//! Each identifier has a stable `i32` wire ordinal and a display name. The
//! ordinals are part of the wire format: new variants get new ordinals, and
//! existing ones are never renumbered.

use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compression algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum CompressionAlgorithm {
    /// LZW with LSB bit order and 8-bit literals
    #[default]
    #[serde(rename = "LZW-LSB-8")]
    LzwLsb8 = 0,
}

impl CompressionAlgorithm {
    pub const ALL: [CompressionAlgorithm; 1] = [CompressionAlgorithm::LzwLsb8];

    /// Convert from a wire ordinal
    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(CompressionAlgorithm::LzwLsb8),
            other => Err(CodecError::UnknownAlgorithm(format!(
                "compression algorithm #{}",
                other
            ))),
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            CompressionAlgorithm::LzwLsb8 => "LZW-LSB-8",
        }
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hash algorithm identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum HashAlgorithm {
    #[default]
    #[serde(rename = "Keccak256")]
    Keccak256 = 0,
    #[serde(rename = "SHA-256")]
    Sha256 = 1,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 2] = [HashAlgorithm::Keccak256, HashAlgorithm::Sha256];

    /// Convert from a wire ordinal
    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(HashAlgorithm::Keccak256),
            1 => Ok(HashAlgorithm::Sha256),
            other => Err(CodecError::UnknownAlgorithm(format!(
                "hash algorithm #{}",
                other
            ))),
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Keccak256 => "Keccak256",
            HashAlgorithm::Sha256 => "SHA-256",
        }
    }

    /// Digest length in bytes
    pub fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Keccak256 | HashAlgorithm::Sha256 => 32,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Channel layout of a pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i32)]
pub enum PixelFormat {
    #[default]
    #[serde(rename = "RGBA")]
    Rgba = 0,
    #[serde(rename = "RGB")]
    Rgb = 1,
    #[serde(rename = "CMYK")]
    Cmyk = 2,
}

impl PixelFormat {
    /// Convert from a wire ordinal
    pub fn from_i32(value: i32) -> Result<Self> {
        match value {
            0 => Ok(PixelFormat::Rgba),
            1 => Ok(PixelFormat::Rgb),
            2 => Ok(PixelFormat::Cmyk),
            other => Err(CodecError::UnknownPixelFormat(other)),
        }
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgba | PixelFormat::Cmyk => 4,
            PixelFormat::Rgb => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PixelFormat::Rgba => "RGBA",
            PixelFormat::Rgb => "RGB",
            PixelFormat::Cmyk => "CMYK",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
