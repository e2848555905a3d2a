use alloc::string::String;
use enough::StopReason;

use crate::pixel::Point;

/// Errors from BMP decoding, encoding and line drawing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("unexpected end of input")]
    Truncated,

    #[error("missing \"BM\" signature")]
    BadSignature,

    #[error("unsupported DIB header size {0} (only 40-byte BITMAPINFOHEADER)")]
    UnsupportedHeaderSize(u32),

    #[error("unsupported bit depth {0} (only 24 bits per pixel)")]
    UnsupportedBitDepth(u16),

    #[error("unsupported compression method {0} (only uncompressed)")]
    UnsupportedCompression(u32),

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("pixel data offset {0} overlaps the headers")]
    InvalidDataOffset(u32),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("pixel count mismatch: need {needed} pixels, got {actual}")]
    BufferSizeMismatch { needed: usize, actual: usize },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("point ({}, {}) is outside the {width}x{height} image", .point.x, .point.y)]
    OutOfBounds {
        point: Point,
        width: u32,
        height: u32,
    },

    #[cfg(feature = "std")]
    #[error("failed to read source")]
    SourceReadFailure(#[source] std::io::Error),

    #[cfg(feature = "std")]
    #[error("failed to write sink")]
    SinkWriteFailure(#[source] std::io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
