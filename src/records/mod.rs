//! Typed engine resource records
//!
//! Each record has a fixed positional layout built from the primitives in
//! [`crate::encoding`]. Records holding pixel data go through the
//! [`crate::integrity::IntegrityPipeline`] before they are stored.

pub mod animation;
pub mod atlas;
pub mod batch;
pub mod blob;
pub mod canvas;
pub mod list;
pub mod pointer;
pub mod prefab;
pub mod texture;

use crate::encoding::{ByteReader, ByteWriter};
use crate::error::Result;
use crate::geometry::Rect;

pub use animation::AnimationRecord;
pub use atlas::{AtlasRecord, CompressedAtlasRecord, CompressedFrames};
pub use batch::BatchRecord;
pub use blob::{deserialize_blobs, serialize_blobs};
pub use canvas::CanvasRecord;
pub use list::ListHeader;
pub use pointer::PointerRecord;
pub use prefab::{
    ComponentRecord, ComponentValue, GameObjectRecord, PrefabRecord, SpriteRecord, TransformRecord,
};
pub use texture::TextureRecord;

/// Write a rectangle as min.x, min.y, max.x, max.y
pub(crate) fn write_rect(writer: &mut ByteWriter, rect: &Rect) {
    writer.put_f64(rect.min.x);
    writer.put_f64(rect.min.y);
    writer.put_f64(rect.max.x);
    writer.put_f64(rect.max.y);
}

pub(crate) fn read_rect(reader: &mut ByteReader<'_>) -> Result<Rect> {
    Ok(Rect::new(
        reader.get_f64()?,
        reader.get_f64()?,
        reader.get_f64()?,
        reader.get_f64()?,
    ))
}
