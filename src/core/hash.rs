//! Content hashing for integrity checks
//!
//! Digests are used to detect corruption after a compression round trip,
//! not to authenticate data.

use crate::algorithm::HashAlgorithm;
use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// Hash data using the specified algorithm
pub fn hash(data: &[u8], algorithm: HashAlgorithm) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Keccak256 => hash_keccak256(data),
        HashAlgorithm::Sha256 => hash_sha256(data),
    }
}

/// Keccak-256 with the original Keccak padding (not FIPS-202 SHA3-256)
pub fn hash_keccak256(data: &[u8]) -> Vec<u8> {
    Keccak256::digest(data).to_vec()
}

pub fn hash_sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}
