//! List headers

use crate::encoding::{ByteReader, ByteWriter, WireRecord};
use crate::error::Result;

/// Count prefix for a list of records stored one after another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListHeader {
    pub count: i32,
}

impl WireRecord for ListHeader {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_i32(self.count);
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(ListHeader {
            count: reader.get_i32()?,
        })
    }
}
