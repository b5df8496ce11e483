//! Algorithm registries
//!
//! A [`Registry`] maps algorithm identifiers to the functions implementing
//! them. It is built once at startup and only read afterward, so a shared
//! reference can be used from any thread without locking.
//!
//! [`Registry::builtin`] registers every built-in algorithm. Lookups of an
//! identifier that was never registered fail with `UnknownAlgorithm`; there
//! is no fallback to a default.

use crate::algorithm::{CompressionAlgorithm, HashAlgorithm};
use crate::error::{CodecError, Result};
use crate::{compression, hash};
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Compress a whole buffer
pub type CompressFn = fn(&[u8]) -> Result<Vec<u8>>;

/// Decompress a buffer to exactly the given original length
pub type DecompressFn = fn(&[u8], usize) -> Result<Vec<u8>>;

/// Compute a digest
pub type HashFn = fn(&[u8]) -> Vec<u8>;

#[derive(Clone, Copy)]
struct CompressionCodec {
    compress: CompressFn,
    decompress: DecompressFn,
}

/// Lookup tables for compression and hash functions
#[derive(Clone, Default)]
pub struct Registry {
    compression: HashMap<CompressionAlgorithm, CompressionCodec>,
    hash: HashMap<HashAlgorithm, HashFn>,
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("compression", &self.compression.keys().collect::<Vec<_>>())
            .field("hash", &self.hash.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry {
    /// Create a registry with nothing registered
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a registry with all built-in algorithms registered
    pub fn builtin() -> Self {
        let mut registry = Registry::empty();

        registry.register_compression(
            CompressionAlgorithm::LzwLsb8,
            compression::compress_lzw_lsb8,
            compression::decompress_lzw_lsb8,
        );
        registry.register_hash(HashAlgorithm::Keccak256, hash::hash_keccak256);
        registry.register_hash(HashAlgorithm::Sha256, hash::hash_sha256);

        registry
    }

    /// Process-wide registry of built-in algorithms
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::builtin)
    }

    /// Register a compression algorithm, replacing any previous entry
    pub fn register_compression(
        &mut self,
        algorithm: CompressionAlgorithm,
        compress: CompressFn,
        decompress: DecompressFn,
    ) -> &mut Self {
        self.compression.insert(
            algorithm,
            CompressionCodec {
                compress,
                decompress,
            },
        );
        self
    }

    /// Register a hash algorithm, replacing any previous entry
    pub fn register_hash(&mut self, algorithm: HashAlgorithm, hash: HashFn) -> &mut Self {
        self.hash.insert(algorithm, hash);
        self
    }

    pub fn has_compression(&self, algorithm: CompressionAlgorithm) -> bool {
        self.compression.contains_key(&algorithm)
    }

    pub fn has_hash(&self, algorithm: HashAlgorithm) -> bool {
        self.hash.contains_key(&algorithm)
    }

    fn codec(&self, algorithm: CompressionAlgorithm) -> Result<CompressionCodec> {
        self.compression
            .get(&algorithm)
            .copied()
            .ok_or_else(|| CodecError::UnknownAlgorithm(algorithm.name().to_string()))
    }

    pub fn compress(&self, algorithm: CompressionAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        (self.codec(algorithm)?.compress)(data)
    }

    pub fn decompress(
        &self,
        algorithm: CompressionAlgorithm,
        data: &[u8],
        original_len: usize,
    ) -> Result<Vec<u8>> {
        (self.codec(algorithm)?.decompress)(data, original_len)
    }

    pub fn hash(&self, algorithm: HashAlgorithm, data: &[u8]) -> Result<Vec<u8>> {
        let hash = self
            .hash
            .get(&algorithm)
            .ok_or_else(|| CodecError::UnknownAlgorithm(algorithm.name().to_string()))?;
        Ok(hash(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(data: &[u8]) -> Result<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn unstore(data: &[u8], original_len: usize) -> Result<Vec<u8>> {
        let mut out = data.to_vec();
        out.resize(original_len, 0);
        Ok(out)
    }

    #[test]
    fn test_builtin_registers_everything() {
        let registry = Registry::builtin();
        for algorithm in CompressionAlgorithm::ALL {
            assert!(registry.has_compression(algorithm));
        }
        for algorithm in HashAlgorithm::ALL {
            assert!(registry.has_hash(algorithm));
        }
    }

    #[test]
    fn test_empty_registry_reports_unknown_algorithm() {
        let registry = Registry::empty();

        assert!(matches!(
            registry.compress(CompressionAlgorithm::LzwLsb8, b"data"),
            Err(CodecError::UnknownAlgorithm(name)) if name == "LZW-LSB-8"
        ));
        assert!(matches!(
            registry.decompress(CompressionAlgorithm::LzwLsb8, b"", 0),
            Err(CodecError::UnknownAlgorithm(_))
        ));
        assert!(matches!(
            registry.hash(HashAlgorithm::Sha256, b"data"),
            Err(CodecError::UnknownAlgorithm(name)) if name == "SHA-256"
        ));
    }

    #[test]
    fn test_registry_matches_direct_dispatch() {
        let registry = Registry::global();
        let data = b"registry dispatch ".repeat(20);

        assert_eq!(
            registry.compress(CompressionAlgorithm::LzwLsb8, &data).unwrap(),
            compression::compress(&data, CompressionAlgorithm::LzwLsb8).unwrap()
        );
        assert_eq!(
            registry.hash(HashAlgorithm::Keccak256, &data).unwrap(),
            hash::hash(&data, HashAlgorithm::Keccak256)
        );
    }

    #[test]
    fn test_register_replaces_entry() {
        let mut registry = Registry::builtin();
        registry.register_compression(CompressionAlgorithm::LzwLsb8, store, unstore);

        let compressed = registry
            .compress(CompressionAlgorithm::LzwLsb8, b"plain")
            .unwrap();
        assert_eq!(compressed, b"plain");

        let restored = registry
            .decompress(CompressionAlgorithm::LzwLsb8, &compressed, 5)
            .unwrap();
        assert_eq!(restored, b"plain");
    }
}
