//! Compress → verify → decompress pipeline
//!
//! **Design**:
//! - Compression never re-hashes: the hash travels unchanged from the
//!   uncompressed picture into the stored record
//! - Decompression restores exactly the stored original length, rehashes with
//!   the stored hash algorithm and rejects any mismatch with `IntegrityError`
//! - Decompression uses only the identifiers stored in the record. Compression
//!   uses the caller's identifier, or the consented default read once when the
//!   pipeline is built

use crate::algorithm::CompressionAlgorithm;
use crate::config::{self, CodecConfig};
use crate::error::{CodecError, Result};
use crate::picture::{CompressedPictureRecord, PictureRecord};
use crate::registry::Registry;
use tracing::{debug, warn};

/// Integrity pipeline bound to a registry
#[derive(Debug, Clone, Copy)]
pub struct IntegrityPipeline<'r> {
    registry: &'r Registry,
    compression: CompressionAlgorithm,
}

impl IntegrityPipeline<'static> {
    /// Pipeline over the built-in registry with the consented algorithms
    pub fn builtin() -> Self {
        IntegrityPipeline::new(Registry::global())
    }
}

impl<'r> IntegrityPipeline<'r> {
    /// Pipeline that compresses with the consented algorithm
    ///
    /// The consented defaults are read once, here.
    pub fn new(registry: &'r Registry) -> Self {
        IntegrityPipeline::with_config(registry, &config::consented())
    }

    /// Pipeline that compresses with the configured algorithm
    pub fn with_config(registry: &'r Registry, config: &CodecConfig) -> Self {
        IntegrityPipeline {
            registry,
            compression: config.compression,
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Algorithm used by [`IntegrityPipeline::compress`]
    pub fn compression_algorithm(&self) -> CompressionAlgorithm {
        self.compression
    }

    /// Compress a picture with the pipeline's compression algorithm
    pub fn compress(&self, picture: &PictureRecord) -> Result<CompressedPictureRecord> {
        self.compress_record(picture, self.compression)
    }

    /// Compress a picture's pixels with an explicit algorithm
    pub fn compress_record(
        &self,
        picture: &PictureRecord,
        algorithm: CompressionAlgorithm,
    ) -> Result<CompressedPictureRecord> {
        let original_len = i32::try_from(picture.pixels.len())
            .map_err(|_| CodecError::EncodingTooLarge(picture.pixels.len() as i64))?;
        let payload = self.registry.compress(algorithm, &picture.pixels)?;

        debug!(
            algorithm = %algorithm,
            original = picture.pixels.len(),
            compressed = payload.len(),
            "Compressed picture"
        );

        Ok(CompressedPictureRecord {
            width: picture.width,
            height: picture.height,
            original_len,
            payload,
            original_hash: picture.hash.clone(),
            original_pixel_format: picture.pixel_format,
            original_hash_algorithm: picture.hash_algorithm,
            compression_algorithm: algorithm,
        })
    }

    /// Restore a picture and verify its content hash
    ///
    /// # Errors
    ///
    /// - `InvalidRecord` / `EncodingTooLarge` if the stored length is
    ///   inconsistent, checked before decompressing
    /// - `UnknownAlgorithm` if the record names an unregistered algorithm
    /// - `IntegrityError` if the restored pixels do not hash to the stored hash
    pub fn decompress_record(&self, compressed: &CompressedPictureRecord) -> Result<PictureRecord> {
        let original_len = compressed.validate()?;
        let pixels = self.registry.decompress(
            compressed.compression_algorithm,
            &compressed.payload,
            original_len,
        )?;
        let digest = self
            .registry
            .hash(compressed.original_hash_algorithm, &pixels)?;

        if digest != compressed.original_hash {
            warn!(
                algorithm = %compressed.original_hash_algorithm,
                expected = %hex::encode(&compressed.original_hash),
                actual = %hex::encode(&digest),
                "Picture failed integrity check"
            );
            return Err(CodecError::IntegrityError {
                expected: compressed.original_hash.clone(),
                actual: digest,
                algorithm: compressed.original_hash_algorithm.name().to_string(),
            });
        }

        debug!(
            algorithm = %compressed.compression_algorithm,
            compressed = compressed.payload.len(),
            original = original_len,
            "Decompressed picture"
        );

        Ok(PictureRecord {
            width: compressed.width,
            height: compressed.height,
            pixels,
            hash: digest,
            pixel_format: compressed.original_pixel_format,
            hash_algorithm: compressed.original_hash_algorithm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{HashAlgorithm, PixelFormat};

    fn gradient(width: i32, height: i32, hash_algorithm: HashAlgorithm) -> PictureRecord {
        let pixels: Vec<u8> = (0..width * height * 4).map(|i| (i / 64) as u8).collect();
        PictureRecord::new(
            width,
            height,
            pixels,
            PixelFormat::Rgba,
            hash_algorithm,
            Registry::global(),
        )
        .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let pipeline = IntegrityPipeline::builtin();
        let picture = gradient(32, 16, HashAlgorithm::Keccak256);

        let compressed = pipeline.compress(&picture).unwrap();
        assert_eq!(compressed.original_len, 32 * 16 * 4);
        assert_eq!(compressed.original_hash, picture.hash);
        assert_eq!(compressed.compression_algorithm, CompressionAlgorithm::LzwLsb8);

        let restored = pipeline.decompress_record(&compressed).unwrap();
        assert_eq!(restored, picture);
    }

    #[test]
    fn test_hash_is_not_recomputed_on_compress() {
        let pipeline = IntegrityPipeline::builtin();
        let mut picture = gradient(4, 4, HashAlgorithm::Sha256);
        picture.hash = vec![0xAA; 32];

        let compressed = pipeline.compress(&picture).unwrap();
        assert_eq!(compressed.original_hash, vec![0xAA; 32]);
        assert!(matches!(
            pipeline.decompress_record(&compressed),
            Err(CodecError::IntegrityError { .. })
        ));
    }

    #[test]
    fn test_corrupted_payload_detected() {
        let pipeline = IntegrityPipeline::builtin();
        let picture = gradient(16, 16, HashAlgorithm::Keccak256);
        let mut compressed = pipeline.compress(&picture).unwrap();

        let middle = compressed.payload.len() / 2;
        compressed.payload[middle] ^= 0xFF;

        match pipeline.decompress_record(&compressed) {
            Err(CodecError::IntegrityError {
                expected,
                actual,
                algorithm,
            }) => {
                assert_eq!(expected, picture.hash);
                assert_ne!(actual, expected);
                assert_eq!(algorithm, "Keccak256");
            }
            other => panic!("expected integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_picture() {
        let pipeline = IntegrityPipeline::builtin();
        let picture = gradient(0, 0, HashAlgorithm::Sha256);

        let compressed = pipeline.compress(&picture).unwrap();
        assert!(compressed.payload.is_empty());
        assert_eq!(compressed.original_len, 0);

        let restored = pipeline.decompress_record(&compressed).unwrap();
        assert!(restored.pixels.is_empty());
        assert_eq!(restored.hash, picture.hash);
    }

    #[test]
    fn test_unregistered_hash_algorithm() {
        let mut registry = Registry::empty();
        registry.register_compression(
            CompressionAlgorithm::LzwLsb8,
            crate::compression::compress_lzw_lsb8,
            crate::compression::decompress_lzw_lsb8,
        );
        let pipeline = IntegrityPipeline::new(&registry);

        let picture = gradient(2, 2, HashAlgorithm::Sha256);
        let compressed = pipeline.compress(&picture).unwrap();

        assert!(matches!(
            pipeline.decompress_record(&compressed),
            Err(CodecError::UnknownAlgorithm(_))
        ));
    }

    fn never_decompress(_data: &[u8], _original_len: usize) -> Result<Vec<u8>> {
        panic!("decompression must not run for an inconsistent record");
    }

    #[test]
    fn test_inconsistent_length_rejected_before_decompression() {
        let mut registry = Registry::builtin();
        registry.register_compression(
            CompressionAlgorithm::LzwLsb8,
            crate::compression::compress_lzw_lsb8,
            never_decompress,
        );
        let pipeline = IntegrityPipeline::new(&registry);

        let mut oversized = pipeline.compress(&gradient(1, 1, HashAlgorithm::Sha256)).unwrap();
        oversized.original_len = 256 * 1024 * 1024;
        assert!(matches!(
            pipeline.decompress_record(&oversized),
            Err(CodecError::InvalidRecord(_))
        ));

        let mut huge = pipeline.compress(&gradient(1, 1, HashAlgorithm::Sha256)).unwrap();
        huge.width = 16384;
        huge.height = 16384;
        huge.original_len = 1 << 30;
        assert!(matches!(
            pipeline.decompress_record(&huge),
            Err(CodecError::EncodingTooLarge(_))
        ));
    }

    #[test]
    fn test_new_uses_consented_compression() {
        let pipeline = IntegrityPipeline::new(Registry::global());
        assert_eq!(
            pipeline.compression_algorithm(),
            config::consented().compression
        );
    }

    #[test]
    fn test_with_config() {
        let config = CodecConfig {
            hash: HashAlgorithm::Sha256,
            ..Default::default()
        };
        let pipeline = IntegrityPipeline::with_config(Registry::global(), &config);
        assert_eq!(pipeline.compression_algorithm(), config.compression);
    }
}
