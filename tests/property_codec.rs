//! Property-based tests for the compression and integrity pipeline
//!
//! Uses proptest to check that round trips are lossless and that payload
//! damage never yields a picture that differs from the original.

use proptest::prelude::*;
use resource_codec::{
    CodecError, CompressedPictureRecord, CompressionAlgorithm, HashAlgorithm, IntegrityPipeline,
    PictureRecord, PixelFormat, Registry, WireRecord,
};

fn picture(width: i32, height: i32, seed: &[u8], hash: HashAlgorithm) -> PictureRecord {
    let len = (width * height * 4) as usize;
    let pixels: Vec<u8> = seed.iter().copied().cycle().take(len).collect();
    PictureRecord::new(
        width,
        height,
        pixels,
        PixelFormat::Rgba,
        hash,
        Registry::global(),
    )
    .unwrap()
}

fn hash_algorithm() -> impl Strategy<Value = HashAlgorithm> {
    prop_oneof![Just(HashAlgorithm::Keccak256), Just(HashAlgorithm::Sha256)]
}

proptest! {
    #[test]
    fn prop_lzw_round_trip(data in prop::collection::vec(any::<u8>(), 0..8192)) {
        let registry = Registry::global();
        let compressed = registry.compress(CompressionAlgorithm::LzwLsb8, &data).unwrap();
        let restored = registry
            .decompress(CompressionAlgorithm::LzwLsb8, &compressed, data.len())
            .unwrap();

        prop_assert_eq!(restored, data);
    }

    #[test]
    fn prop_picture_round_trip(
        width in 0i32..48,
        height in 0i32..48,
        seed in prop::collection::vec(any::<u8>(), 1..64),
        hash in hash_algorithm()
    ) {
        let pipeline = IntegrityPipeline::builtin();
        let original = picture(width, height, &seed, hash);

        let bytes = pipeline.compress(&original).unwrap().to_bytes().unwrap();
        let stored = CompressedPictureRecord::from_bytes(&bytes).unwrap();
        let restored = pipeline.decompress_record(&stored).unwrap();

        prop_assert_eq!(restored, original);
    }

    #[test]
    fn prop_payload_damage_never_passes_silently(
        seed in prop::collection::vec(any::<u8>(), 1..64),
        position in any::<prop::sample::Index>(),
        mask in 1u8..=255
    ) {
        let pipeline = IntegrityPipeline::builtin();
        let original = picture(16, 16, &seed, HashAlgorithm::Keccak256);
        let mut compressed = pipeline.compress(&original).unwrap();

        let index = position.index(compressed.payload.len());
        compressed.payload[index] ^= mask;

        // Unused padding bits may be flipped without changing the output
        match pipeline.decompress_record(&compressed) {
            Ok(restored) => prop_assert_eq!(restored.pixels, original.pixels),
            Err(CodecError::IntegrityError { expected, actual, .. }) => {
                prop_assert_eq!(&expected, &original.hash);
                prop_assert_ne!(&actual, &original.hash);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn prop_truncated_record_rejected(
        seed in prop::collection::vec(any::<u8>(), 1..64),
        cut in any::<prop::sample::Index>()
    ) {
        let pipeline = IntegrityPipeline::builtin();
        let bytes = pipeline
            .compress(&picture(8, 8, &seed, HashAlgorithm::Sha256))
            .unwrap()
            .to_bytes()
            .unwrap();

        let cut = cut.index(bytes.len());
        let result = CompressedPictureRecord::from_bytes(&bytes[..cut]);
        prop_assert!(
            matches!(result, Err(CodecError::TruncatedInput { .. })),
            "cut at {} gave {:?}",
            cut,
            result
        );
    }
}
