//! Sprite animation records
//!
//! Layout: spritesheet id, texture id, `[count: i32]`, `count` frames of four
//! `f64` corners, then `count` durations as `i32`. Frames and durations are
//! stored as two parallel arrays sharing a single count.

use crate::encoding::{ByteReader, ByteWriter, WireRecord};
use crate::error::{CodecError, Result};
use crate::geometry::Rect;
use crate::records::{read_rect, write_rect};

/// Frames of an animation and how long each is shown
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnimationRecord {
    pub spritesheet_id: String,
    pub texture_id: String,
    pub frames: Vec<Rect>,
    pub durations: Vec<i32>,
}

impl AnimationRecord {
    pub fn frame(&self, index: usize) -> Option<(Rect, i32)> {
        Some((*self.frames.get(index)?, *self.durations.get(index)?))
    }

    pub fn total_duration(&self) -> i64 {
        self.durations.iter().map(|&d| d as i64).sum()
    }
}

impl WireRecord for AnimationRecord {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        if self.frames.len() != self.durations.len() {
            return Err(CodecError::InvalidRecord(format!(
                "animation has {} frames but {} durations",
                self.frames.len(),
                self.durations.len()
            )));
        }

        writer.put_str(&self.spritesheet_id)?;
        writer.put_str(&self.texture_id)?;
        writer.put_len(self.frames.len())?;

        for frame in &self.frames {
            write_rect(writer, frame);
        }

        for &duration in &self.durations {
            writer.put_i32(duration);
        }

        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let spritesheet_id = reader.get_string()?;
        let texture_id = reader.get_string()?;
        let count = reader.get_count(Rect::ENCODED_SIZE + 4)?;

        let frames = (0..count)
            .map(|_| read_rect(reader))
            .collect::<Result<Vec<_>>>()?;
        let durations = (0..count)
            .map(|_| reader.get_i32())
            .collect::<Result<Vec<_>>>()?;

        Ok(AnimationRecord {
            spritesheet_id,
            texture_id,
            frames,
            durations,
        })
    }
}
