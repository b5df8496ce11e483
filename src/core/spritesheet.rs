//! Spritesheet tiling
//!
//! A spritesheet descriptor places an evenly spaced grid over a region of a
//! bitmap. The origin is the bottom-left corner of the region (y grows
//! upward), but frames are produced top row first, left to right:
//!
//! ```text
//!  top = origin.y + area.pixel_height
//!   ┌─────┬─────┬─────┐
//!   │  0  │  1  │  2  │
//!   ├─────┼─────┼─────┤
//!   │  3  │  4  │  5  │
//!   └─────┴─────┴─────┘
//!  origin
//! ```
//!
//! Cell sizes are real-valued, so cell boundaries may fall between pixels.

use crate::encoding::{ByteReader, ByteWriter, WireRecord};
use crate::error::{CodecError, Result};
use crate::geometry::Rect;
use tracing::trace;

/// Bottom-left corner of the tiled region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Origin {
    pub x: i32,
    pub y: i32,
}

/// Size of the tiled region in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Area {
    pub pixel_width: i32,
    pub pixel_height: i32,
}

/// Grid layout of a spritesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpritesheetDescriptor {
    /// Number of columns
    pub grid_width: i32,
    /// Number of rows
    pub grid_height: i32,
    pub origin: Origin,
    pub area: Area,
}

impl SpritesheetDescriptor {
    /// On-wire size: six `i32` fields
    pub const ENCODED_SIZE: usize = 24;

    pub fn new(grid_width: i32, grid_height: i32, origin: Origin, area: Area) -> Self {
        SpritesheetDescriptor {
            grid_width,
            grid_height,
            origin,
            area,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.grid_width.max(0) as usize * self.grid_height.max(0) as usize
    }

    /// Validate the grid shape and check the region fits the bitmap
    pub fn validate(&self, bitmap_width: i32, bitmap_height: i32) -> Result<()> {
        if self.grid_width < 1 || self.grid_height < 1 {
            return Err(CodecError::InvalidSpritesheet(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }

        if self.area.pixel_width < 0 || self.area.pixel_height < 0 {
            return Err(CodecError::InvalidSpritesheet(format!(
                "area must not be negative, got {}x{}",
                self.area.pixel_width, self.area.pixel_height
            )));
        }

        let right = self.origin.x as i64 + self.area.pixel_width as i64;
        let top = self.origin.y as i64 + self.area.pixel_height as i64;

        if self.origin.x < 0 || right > bitmap_width as i64 {
            return Err(CodecError::OutOfBounds(format!(
                "columns {}..{} exceed bitmap width {}",
                self.origin.x, right, bitmap_width
            )));
        }

        if self.origin.y < 0 || top > bitmap_height as i64 {
            return Err(CodecError::OutOfBounds(format!(
                "rows {}..{} exceed bitmap height {}",
                self.origin.y, top, bitmap_height
            )));
        }

        Ok(())
    }

    /// Compute the frame rectangles for a bitmap of the given size
    ///
    /// Returns exactly `grid_width * grid_height` rectangles, row-major, top
    /// row first, left to right within a row.
    pub fn frames(&self, bitmap_width: i32, bitmap_height: i32) -> Result<Vec<Rect>> {
        self.validate(bitmap_width, bitmap_height)?;

        let left = self.origin.x as f64;
        let top = self.origin.y as f64 + self.area.pixel_height as f64;
        let cell_width = self.area.pixel_width as f64 / self.grid_width as f64;
        let cell_height = self.area.pixel_height as f64 / self.grid_height as f64;

        let mut frames = Vec::with_capacity(self.frame_count());

        for row in 0..self.grid_height {
            let y = top - row as f64 * cell_height;

            for column in 0..self.grid_width {
                let x = left + column as f64 * cell_width;
                frames.push(Rect::new(x, y - cell_height, x + cell_width, y));
            }
        }

        trace!(
            frames = frames.len(),
            cell_width,
            cell_height,
            "Tiled spritesheet"
        );

        Ok(frames)
    }
}

impl WireRecord for SpritesheetDescriptor {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_i32(self.grid_width);
        writer.put_i32(self.grid_height);
        writer.put_i32(self.origin.x);
        writer.put_i32(self.origin.y);
        writer.put_i32(self.area.pixel_width);
        writer.put_i32(self.area.pixel_height);
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(SpritesheetDescriptor {
            grid_width: reader.get_i32()?,
            grid_height: reader.get_i32()?,
            origin: Origin {
                x: reader.get_i32()?,
                y: reader.get_i32()?,
            },
            area: Area {
                pixel_width: reader.get_i32()?,
                pixel_height: reader.get_i32()?,
            },
        })
    }
}
