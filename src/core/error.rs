use thiserror::Error;

/// Errors raised while encoding, decoding or verifying resources
#[derive(Error, Debug)]
pub enum CodecError {
    /// Fewer bytes remain than the next field needs
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    /// Length prefix is negative, overflows, or needs an absurd allocation
    #[error("Encoding too large: length {0} is out of range")]
    EncodingTooLarge(i64),

    /// Algorithm identifier is unknown or not registered
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// Pixel format ordinal has no variant
    #[error("Unknown pixel format ordinal: {0}")]
    UnknownPixelFormat(i32),

    /// Restored data does not hash to the stored content hash
    #[error(
        "Data corruption error: expected {} but got {} ({algorithm})",
        hex::encode(.expected),
        hex::encode(.actual)
    )]
    IntegrityError {
        expected: Vec<u8>,
        actual: Vec<u8>,
        algorithm: String,
    },

    /// Spritesheet region extends past the bitmap
    #[error("Spritesheet out of bounds: {0}")]
    OutOfBounds(String),

    /// Spritesheet grid or area is malformed
    #[error("Invalid spritesheet: {0}")]
    InvalidSpritesheet(String),

    /// Pixel buffer length disagrees with dimensions and format
    #[error("Invalid pixel buffer: expected {expected} bytes, got {actual}")]
    InvalidPixelBuffer { expected: usize, actual: usize },

    /// Record fields are inconsistent with each other
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// String field is not valid UTF-8
    #[error("Invalid UTF-8 string: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Compressor failed
    #[error("Compression error: {0}")]
    Compression(String),

    /// Prefab (bincode) encoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// Configuration could not be parsed or written
    #[error("Configuration error: {0}")]
    Config(String),

    /// Consented defaults were already installed or read
    #[error("Consented algorithms already installed")]
    ConfigAlreadyInstalled,
}

pub type Result<T> = std::result::Result<T, CodecError>;
