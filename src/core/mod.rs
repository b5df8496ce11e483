//! Serialization, compression and integrity core
//!
//! - [`encoding`] - Big-endian primitives and the [`encoding::WireRecord`] trait
//! - [`algorithm`] - Compression, hash and pixel format identifiers
//! - [`compression`] / [`hash`] - Built-in algorithm implementations
//! - [`registry`] - Identifier → function lookup tables
//! - [`config`] - Consented defaults, loaded from TOML or JSON
//! - [`picture`] - Picture records and their compressed form
//! - [`integrity`] - Compress → verify → decompress pipeline
//! - [`spritesheet`] - Grid tiling of bitmap regions

pub mod algorithm;
pub mod compression;
pub mod config;
pub mod encoding;
pub mod error;
pub mod geometry;
pub mod hash;
pub mod integrity;
pub mod picture;
pub mod registry;
pub mod spritesheet;

pub use integrity::IntegrityPipeline;
pub use picture::{CompressedPictureRecord, PictureRecord, RawPixelSource};
pub use registry::Registry;
