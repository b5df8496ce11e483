//! Glyph atlas records
//!
//! An atlas is a symbol-set picture plus a table mapping each symbol to its
//! rectangle in that picture. The table is compressed separately from the
//! picture:
//!
//! ```text
//! CompressedFrames: i32 frame count, i32 original length,
//!                   i32 compression algorithm, blob data
//! CompressedAtlas:  blob(CompressedFrames), blob(CompressedPictureRecord)
//! ```
//!
//! Table entries are `[symbol: i32][rect: 4 x f64]`, written in map
//! iteration order. The order carries no meaning.

use crate::algorithm::CompressionAlgorithm;
use crate::compression::max_decompressed_len;
use crate::encoding::{ByteReader, ByteWriter, WireRecord};
use crate::error::{CodecError, Result};
use crate::geometry::Rect;
use crate::integrity::IntegrityPipeline;
use crate::picture::{CompressedPictureRecord, PictureRecord};
use crate::records::{read_rect, write_rect};
use std::collections::HashMap;
use tracing::debug;

/// Size of one symbol table entry
const FRAME_ENTRY_SIZE: usize = 4 + Rect::ENCODED_SIZE;

/// Glyph atlas: symbol rectangles over a symbol-set picture
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasRecord {
    pub frames: HashMap<char, Rect>,
    pub symbol_set: PictureRecord,
}

/// Compressed symbol table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedFrames {
    pub frame_count: i32,
    pub original_len: i32,
    pub compression_algorithm: CompressionAlgorithm,
    pub data: Vec<u8>,
}

/// Stored form of an [`AtlasRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedAtlasRecord {
    pub frames: CompressedFrames,
    pub symbol_set: CompressedPictureRecord,
}

fn frames_to_bytes(frames: &HashMap<char, Rect>) -> Vec<u8> {
    let mut writer = ByteWriter::with_capacity(frames.len() * FRAME_ENTRY_SIZE);

    for (&symbol, rect) in frames {
        writer.put_u32(u32::from(symbol));
        write_rect(&mut writer, rect);
    }

    writer.finish()
}

fn frames_from_bytes(data: &[u8], frame_count: usize) -> Result<HashMap<char, Rect>> {
    let mut reader = ByteReader::new(data);
    let mut frames = HashMap::with_capacity(frame_count);

    for _ in 0..frame_count {
        let scalar = reader.get_u32()?;
        let symbol = char::from_u32(scalar).ok_or_else(|| {
            CodecError::InvalidRecord(format!("invalid atlas symbol U+{:X}", scalar))
        })?;
        frames.insert(symbol, read_rect(&mut reader)?);
    }

    Ok(frames)
}

impl AtlasRecord {
    /// Compress the symbol table and the symbol-set picture
    pub fn compress(
        &self,
        pipeline: &IntegrityPipeline<'_>,
        algorithm: CompressionAlgorithm,
    ) -> Result<CompressedAtlasRecord> {
        let table = frames_to_bytes(&self.frames);
        let data = pipeline.registry().compress(algorithm, &table)?;

        let frames = CompressedFrames {
            frame_count: to_i32(self.frames.len())?,
            original_len: to_i32(table.len())?,
            compression_algorithm: algorithm,
            data,
        };
        let symbol_set = pipeline.compress_record(&self.symbol_set, algorithm)?;

        debug!(
            symbols = self.frames.len(),
            table = table.len(),
            "Compressed atlas"
        );

        Ok(CompressedAtlasRecord { frames, symbol_set })
    }
}

impl CompressedAtlasRecord {
    /// Restore the symbol table and verify the symbol-set picture
    pub fn decompress(&self, pipeline: &IntegrityPipeline<'_>) -> Result<AtlasRecord> {
        let frame_count = non_negative(self.frames.frame_count)?;
        let original_len = non_negative(self.frames.original_len)?;

        if frame_count.checked_mul(FRAME_ENTRY_SIZE) != Some(original_len) {
            return Err(CodecError::InvalidRecord(format!(
                "atlas table of {} bytes cannot hold {} symbols",
                original_len, frame_count
            )));
        }

        let limit = max_decompressed_len(self.frames.data.len(), self.frames.compression_algorithm);
        if original_len > limit {
            return Err(CodecError::EncodingTooLarge(original_len as i64));
        }

        let table = pipeline.registry().decompress(
            self.frames.compression_algorithm,
            &self.frames.data,
            original_len,
        )?;
        let frames = frames_from_bytes(&table, frame_count)?;

        if frames.len() != frame_count {
            return Err(CodecError::InvalidRecord(format!(
                "atlas table repeats symbols: {} entries, {} distinct",
                frame_count,
                frames.len()
            )));
        }

        let symbol_set = pipeline.decompress_record(&self.symbol_set)?;

        Ok(AtlasRecord { frames, symbol_set })
    }
}

impl WireRecord for CompressedFrames {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_i32(self.frame_count);
        writer.put_i32(self.original_len);
        writer.put_i32(self.compression_algorithm.as_i32());
        writer.put_bytes(&self.data)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        Ok(CompressedFrames {
            frame_count: reader.get_i32()?,
            original_len: reader.get_i32()?,
            compression_algorithm: CompressionAlgorithm::from_i32(reader.get_i32()?)?,
            data: reader.get_bytes()?,
        })
    }
}

impl WireRecord for CompressedAtlasRecord {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_bytes(&self.frames.to_bytes()?)?;
        writer.put_bytes(&self.symbol_set.to_bytes()?)
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let frames = CompressedFrames::from_bytes(&reader.get_bytes()?)?;
        let symbol_set = CompressedPictureRecord::from_bytes(&reader.get_bytes()?)?;
        Ok(CompressedAtlasRecord { frames, symbol_set })
    }
}

fn to_i32(len: usize) -> Result<i32> {
    i32::try_from(len).map_err(|_| CodecError::EncodingTooLarge(len as i64))
}

fn non_negative(value: i32) -> Result<usize> {
    usize::try_from(value).map_err(|_| CodecError::EncodingTooLarge(value as i64))
}
