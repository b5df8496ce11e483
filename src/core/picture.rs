//! Picture records
//!
//! A [`PictureRecord`] holds raw pixels together with the content hash that
//! vouches for them. A [`CompressedPictureRecord`] is its stored form: the
//! compressed pixels plus everything needed to restore and verify them.
//!
//! ## Wire layout (big-endian)
//!
//! ```text
//! i32  width
//! i32  height
//! i32  original pixel length
//! i32  payload length
//! [u8] payload
//! i32  hash length
//! [u8] original hash
//! i32  original pixel format
//! i32  original hash algorithm
//! i32  compression algorithm
//! ```

use crate::algorithm::{CompressionAlgorithm, HashAlgorithm, PixelFormat};
use crate::compression::max_decompressed_len;
use crate::config::{self, CodecConfig};
use crate::encoding::{ByteReader, ByteWriter, WireRecord};
use crate::error::{CodecError, Result};
use crate::geometry::Rect;
use crate::registry::Registry;
use crate::spritesheet::SpritesheetDescriptor;

/// A source of decoded pixels
///
/// Implemented by whatever turns image files into raw buffers. Pixels must
/// be in canonical channel order, row-major from the top-left corner; any
/// flipping for a rendering convention happens outside the codec.
pub trait RawPixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixels(&self) -> &[u8];
}

/// Uncompressed picture with its content hash
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureRecord {
    pub width: i32,
    pub height: i32,
    pub pixels: Vec<u8>,
    pub hash: Vec<u8>,
    pub pixel_format: PixelFormat,
    pub hash_algorithm: HashAlgorithm,
}

impl PictureRecord {
    /// Build a picture and compute its content hash
    ///
    /// # Errors
    ///
    /// - `InvalidRecord` if a dimension is negative
    /// - `InvalidPixelBuffer` if `pixels` does not hold exactly
    ///   `width * height` pixels of `pixel_format`
    /// - `UnknownAlgorithm` if `hash_algorithm` is not registered
    pub fn new(
        width: i32,
        height: i32,
        pixels: Vec<u8>,
        pixel_format: PixelFormat,
        hash_algorithm: HashAlgorithm,
        registry: &Registry,
    ) -> Result<Self> {
        let expected = expected_pixel_len(width, height, pixel_format)?;
        if pixels.len() != expected {
            return Err(CodecError::InvalidPixelBuffer {
                expected,
                actual: pixels.len(),
            });
        }

        let hash = registry.hash(hash_algorithm, &pixels)?;

        Ok(PictureRecord {
            width,
            height,
            pixels,
            hash,
            pixel_format,
            hash_algorithm,
        })
    }

    /// Build an RGBA picture from a decoded pixel source
    pub fn from_source<S: RawPixelSource>(
        source: &S,
        hash_algorithm: HashAlgorithm,
        registry: &Registry,
    ) -> Result<Self> {
        let width = dimension(source.width())?;
        let height = dimension(source.height())?;

        PictureRecord::new(
            width,
            height,
            source.pixels().to_vec(),
            PixelFormat::Rgba,
            hash_algorithm,
            registry,
        )
    }

    /// Build a picture from a decoded pixel source with configured algorithms
    ///
    /// The source pixels must already be in `config.pixel_format`.
    pub fn from_source_with<S: RawPixelSource>(
        source: &S,
        config: &CodecConfig,
        registry: &Registry,
    ) -> Result<Self> {
        PictureRecord::new(
            dimension(source.width())?,
            dimension(source.height())?,
            source.pixels().to_vec(),
            config.pixel_format,
            config.hash,
            registry,
        )
    }

    /// Build a picture with the process-wide consented algorithms
    pub fn from_source_consented<S: RawPixelSource>(
        source: &S,
        registry: &Registry,
    ) -> Result<Self> {
        PictureRecord::from_source_with(source, &config::consented(), registry)
    }

    /// Recompute the content hash and compare it with the stored one
    pub fn verify(&self, registry: &Registry) -> Result<()> {
        let digest = registry.hash(self.hash_algorithm, &self.pixels)?;
        if digest != self.hash {
            return Err(CodecError::IntegrityError {
                expected: self.hash.clone(),
                actual: digest,
                algorithm: self.hash_algorithm.name().to_string(),
            });
        }
        Ok(())
    }

    /// Tile a spritesheet over this picture
    pub fn spritesheet_frames(&self, descriptor: &SpritesheetDescriptor) -> Result<Vec<Rect>> {
        descriptor.frames(self.width, self.height)
    }
}

/// Stored form of a [`PictureRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedPictureRecord {
    pub width: i32,
    pub height: i32,
    /// Pixel buffer length before compression
    pub original_len: i32,
    pub payload: Vec<u8>,
    pub original_hash: Vec<u8>,
    pub original_pixel_format: PixelFormat,
    pub original_hash_algorithm: HashAlgorithm,
    pub compression_algorithm: CompressionAlgorithm,
}

impl CompressedPictureRecord {
    /// Tile a spritesheet without decompressing the pixels
    pub fn spritesheet_frames(&self, descriptor: &SpritesheetDescriptor) -> Result<Vec<Rect>> {
        descriptor.frames(self.width, self.height)
    }

    /// Pixel buffer length before compression
    pub fn original_len(&self) -> Result<usize> {
        usize::try_from(self.original_len)
            .map_err(|_| CodecError::EncodingTooLarge(self.original_len as i64))
    }

    /// Check the stored length before anything of that size is allocated
    ///
    /// The length must match the dimensions and pixel format, and must be
    /// reachable by decompressing the payload.
    ///
    /// # Errors
    ///
    /// - `InvalidRecord` if the length disagrees with the dimensions
    /// - `EncodingTooLarge` if the length is negative, overflows, or exceeds
    ///   what the payload can expand to
    pub fn validate(&self) -> Result<usize> {
        let original_len = self.original_len()?;
        let expected = expected_pixel_len(self.width, self.height, self.original_pixel_format)?;

        if original_len != expected {
            return Err(CodecError::InvalidRecord(format!(
                "{}x{} {} picture holds {} bytes, record claims {}",
                self.width, self.height, self.original_pixel_format, expected, original_len
            )));
        }

        if original_len > max_decompressed_len(self.payload.len(), self.compression_algorithm) {
            return Err(CodecError::EncodingTooLarge(original_len as i64));
        }

        Ok(original_len)
    }
}

impl WireRecord for CompressedPictureRecord {
    fn encode(&self, writer: &mut ByteWriter) -> Result<()> {
        writer.put_i32(self.width);
        writer.put_i32(self.height);
        writer.put_i32(self.original_len);
        writer.put_bytes(&self.payload)?;
        writer.put_bytes(&self.original_hash)?;
        writer.put_i32(self.original_pixel_format.as_i32());
        writer.put_i32(self.original_hash_algorithm.as_i32());
        writer.put_i32(self.compression_algorithm.as_i32());
        Ok(())
    }

    fn decode(reader: &mut ByteReader<'_>) -> Result<Self> {
        let width = reader.get_i32()?;
        let height = reader.get_i32()?;
        let original_len = reader.get_i32()?;

        let record = CompressedPictureRecord {
            width,
            height,
            original_len,
            payload: reader.get_bytes()?,
            original_hash: reader.get_bytes()?,
            original_pixel_format: PixelFormat::from_i32(reader.get_i32()?)?,
            original_hash_algorithm: HashAlgorithm::from_i32(reader.get_i32()?)?,
            compression_algorithm: CompressionAlgorithm::from_i32(reader.get_i32()?)?,
        };

        record.validate()?;
        Ok(record)
    }
}

fn dimension(value: u32) -> Result<i32> {
    i32::try_from(value).map_err(|_| CodecError::EncodingTooLarge(value as i64))
}

/// Pixel buffer length for the given dimensions, checked against overflow
pub fn expected_pixel_len(width: i32, height: i32, pixel_format: PixelFormat) -> Result<usize> {
    if width < 0 || height < 0 {
        return Err(CodecError::InvalidRecord(format!(
            "picture dimensions must not be negative, got {}x{}",
            width, height
        )));
    }

    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(pixel_format.bytes_per_pixel()))
        .ok_or_else(|| {
            CodecError::EncodingTooLarge(
                (width as i64)
                    .saturating_mul(height as i64)
                    .saturating_mul(pixel_format.bytes_per_pixel() as i64),
            )
        })
}
