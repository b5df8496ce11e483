//! Draw batch records

use crate::encoding::{ByteReader, ByteWriter, WireRecord};
use crate::error::Result;

/// A batch of sprites drawn together on one canvas with one texture
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchRecord {
    pub name: String,
    pub canvas_id: String,
    pub texture_id: String,
    /// Lowest Z of sprites in the batch
    pub z_min: f32,
    /// Highest Z of sprites in the batch
    pub z_max: f32,
}

impl WireRecord for BatchRecord {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_str(&self.name)?;
        writer.put_str(&self.canvas_id)?;
        writer.put_str(&self.texture_id)?;
        writer.put_f32(self.z_min);
        writer.put_f32(self.z_max);
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(BatchRecord {
            name: reader.get_string()?,
            canvas_id: reader.get_string()?,
            texture_id: reader.get_string()?,
            z_min: reader.get_f32()?,
            z_max: reader.get_f32()?,
        })
    }
}
