//! Codec configuration and consented defaults
//!
//! The consented algorithms are the identifiers used when a caller does not
//! pick one explicitly. They are installed once at startup with [`install`]
//! and never change afterward. Records always store the identifiers that
//! were actually used, so decoding never consults this configuration.
//!
//! ```toml
//! compression = "LZW-LSB-8"
//! hash = "SHA-256"
//! pixel_format = "RGBA"
//! ```

use crate::algorithm::{CompressionAlgorithm, HashAlgorithm, PixelFormat};
use crate::error::{CodecError, Result};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::info;

static CONSENTED: OnceLock<CodecConfig> = OnceLock::new();

/// Default algorithms for encoding new records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Compression algorithm for picture payloads
    pub compression: CompressionAlgorithm,

    /// Hash algorithm for content hashes
    pub hash: HashAlgorithm,

    /// Pixel format of pictures built from raw sources
    pub pixel_format: PixelFormat,
}

impl CodecConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| CodecError::Config(e.to_string()))
    }

    pub fn from_json_str(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| CodecError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| CodecError::Config(e.to_string()))
    }
}

/// Install the process-wide consented defaults
///
/// # Errors
///
/// Returns `ConfigAlreadyInstalled` if defaults were installed before, or
/// were already read through [`consented`].
pub fn install(config: CodecConfig) -> Result<()> {
    CONSENTED
        .set(config)
        .map_err(|_| CodecError::ConfigAlreadyInstalled)?;

    info!(
        compression = %config.compression,
        hash = %config.hash,
        pixel_format = %config.pixel_format,
        "Installed consented codec algorithms"
    );
    Ok(())
}

/// The process-wide consented defaults
///
/// The first read freezes the defaults if nothing was installed.
pub fn consented() -> CodecConfig {
    *CONSENTED.get_or_init(CodecConfig::default)
}
