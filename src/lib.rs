//! # Resource Codec - Binary Engine Resource Format
//!
//! `resource-codec` encodes typed engine resources into compact, positional
//! byte streams and decodes them back:
//!
//! - **Pictures** compressed with LZW and stamped with a Keccak-256 or SHA-256
//!   content hash, verified on every decompression
//! - **Spritesheets** tiled into frame rectangles
//! - **Animations, atlases, canvases, textures, batches, prefabs** as typed records
//!
//! ## Quick Start
//!
//! ```rust
//! use resource_codec::{
//!     CompressedPictureRecord, HashAlgorithm, IntegrityPipeline, PictureRecord, PixelFormat,
//!     Registry, Result, WireRecord,
//! };
//!
//! # fn main() -> Result<()> {
//! let registry = Registry::global();
//! let picture = PictureRecord::new(
//!     2,
//!     2,
//!     vec![0xFF; 2 * 2 * 4],
//!     PixelFormat::Rgba,
//!     HashAlgorithm::Keccak256,
//!     registry,
//! )?;
//!
//! let pipeline = IntegrityPipeline::new(registry);
//! let bytes = pipeline.compress(&picture)?.to_bytes()?;
//!
//! // Later: parse, decompress and verify
//! let stored = CompressedPictureRecord::from_bytes(&bytes)?;
//! let restored = pipeline.decompress_record(&stored)?;
//! assert_eq!(restored.pixels, picture.pixels);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  records: animation, atlas, canvas, ...     │
//! ├─────────────────────────────────────────────┤
//! │  integrity: compress → hash check           │
//! │  spritesheet: grid → frame rectangles       │
//! ├─────────────────────────────────────────────┤
//! │  registry: algorithm id → function          │
//! │  compression (LZW) / hash (Keccak, SHA-256) │
//! ├─────────────────────────────────────────────┤
//! │  encoding: big-endian primitives            │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Every stored record names the algorithms it was produced with, so reading
//! never depends on the reader's defaults.

pub mod core;
pub mod records;

// Re-export core modules internally so crate:: paths in core still work
#[allow(unused_imports)]
pub(crate) use crate::core::{
    algorithm, compression, config, encoding, error, geometry, hash, integrity, picture, registry,
    spritesheet,
};

pub use crate::core::{
    algorithm::{CompressionAlgorithm, HashAlgorithm, PixelFormat},
    config::CodecConfig,
    encoding::{ByteReader, ByteWriter, WireRecord},
    error::{CodecError, Result},
    geometry::{Rect, Vec2},
    integrity::IntegrityPipeline,
    picture::{CompressedPictureRecord, PictureRecord, RawPixelSource},
    registry::Registry,
    spritesheet::{Area, Origin, SpritesheetDescriptor},
};
pub use crate::records::{
    AnimationRecord, AtlasRecord, BatchRecord, CanvasRecord, CompressedAtlasRecord, ListHeader,
    PointerRecord, PrefabRecord, TextureRecord,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
