//! Texture records

use crate::encoding::{ByteReader, ByteWriter, WireRecord};
use crate::error::Result;

/// Nearest-neighbour sampling
pub const FILTERING_NEAREST: u32 = 0;

/// Linear sampling
pub const FILTERING_LINEAR: u32 = 1;

/// GPU texture created from a stored picture
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextureRecord {
    pub name: String,
    pub picture_id: String,
    /// Sampling filter; unknown values are preserved as-is
    pub filtering: u32,
}

impl TextureRecord {
    pub fn is_linear(&self) -> bool {
        self.filtering == FILTERING_LINEAR
    }
}

impl WireRecord for TextureRecord {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_str(&self.name)?;
        writer.put_str(&self.picture_id)?;
        writer.put_u32(self.filtering);
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(TextureRecord {
            name: reader.get_string()?,
            picture_id: reader.get_string()?,
            filtering: reader.get_u32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_round_trip() {
        let texture = TextureRecord {
            name: "cirno".to_string(),
            picture_id: "cirno-sheet".to_string(),
            filtering: FILTERING_LINEAR,
        };

        let bytes = texture.to_bytes().unwrap();
        assert_eq!(bytes.len(), 4 + 5 + 4 + 11 + 4);

        let restored = TextureRecord::from_bytes(&bytes).unwrap();
        assert_eq!(restored, texture);
        assert!(restored.is_linear());
    }

    #[test]
    fn test_unknown_filtering_preserved() {
        let texture = TextureRecord {
            filtering: 7,
            ..Default::default()
        };
        let restored = TextureRecord::from_bytes(&texture.to_bytes().unwrap()).unwrap();
        assert_eq!(restored.filtering, 7);
        assert!(!restored.is_linear());
    }
}
