//! Canvas records

use crate::encoding::{ByteReader, ByteWriter, WireRecord};
use crate::error::Result;

/// Render target with its draw order and projection
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasRecord {
    pub name: String,
    pub draw_z: i32,
    /// 4x4 projection matrix, column-major
    pub projection: [f32; 16],
}

impl CanvasRecord {
    pub const IDENTITY: [f32; 16] = [
        1.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.0, 0.0, 0.0, 1.0,
    ];

    /// Orthographic projection mapping the box to clip space
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> [f32; 16] {
        let mut m = [0.0; 16];
        m[0] = 2.0 / (right - left);
        m[5] = 2.0 / (top - bottom);
        m[10] = -2.0 / (far - near);
        m[12] = -(right + left) / (right - left);
        m[13] = -(top + bottom) / (top - bottom);
        m[14] = -(far + near) / (far - near);
        m[15] = 1.0;
        m
    }
}

impl Default for CanvasRecord {
    fn default() -> Self {
        CanvasRecord {
            name: String::new(),
            draw_z: 0,
            projection: Self::IDENTITY,
        }
    }
}

impl WireRecord for CanvasRecord {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_str(&self.name)?;
        writer.put_i32(self.draw_z);
        for &value in &self.projection {
            writer.put_f32(value);
        }
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let name = reader.get_string()?;
        let draw_z = reader.get_i32()?;
        let mut projection = [0.0; 16];
        for value in projection.iter_mut() {
            *value = reader.get_f32()?;
        }

        Ok(CanvasRecord {
            name,
            draw_z,
            projection,
        })
    }
}
