//! Row-layout arithmetic shared by the header codec and the pixel buffer.

use crate::error::BitmapError;

use super::PIXEL_DATA_OFFSET;

/// Byte geometry of a 24-bit image, validated to fit the header fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Geometry {
    /// Unpadded bytes per row (width * 3).
    pub row_bytes: usize,
    /// Padded bytes per row on disk (multiple of 4).
    pub stride: usize,
    /// Padded size of the whole pixel array.
    pub data_size: usize,
    /// Bytes needed for the decoded grid.
    pub pixel_bytes: usize,
}

impl Geometry {
    /// Rejects zero dimensions and anything whose file size would not fit
    /// in the 32-bit size field or whose dimensions would not fit in `i32`.
    pub(crate) fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge { width, height };
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(too_large());
        }
        if width == 0 || height == 0 {
            return Err(BitmapError::InvalidDimensions {
                width: width as i32,
                height: height as i32,
            });
        }
        let w = width as usize;
        let h = height as usize;
        let row_bytes = w.checked_mul(3).ok_or_else(too_large)?;
        let stride = row_bytes
            .checked_add(3)
            .map(|r| r & !3)
            .ok_or_else(too_large)?;
        let data_size = stride.checked_mul(h).ok_or_else(too_large)?;
        let file_size = data_size
            .checked_add(PIXEL_DATA_OFFSET)
            .ok_or_else(too_large)?;
        if file_size > u32::MAX as usize {
            return Err(too_large());
        }
        let pixel_bytes = row_bytes.checked_mul(h).ok_or_else(too_large)?;
        Ok(Self {
            row_bytes,
            stride,
            data_size,
            pixel_bytes,
        })
    }

    /// Bytes a bottom-up pixel array must hold: every padded row except the
    /// last, whose trailing padding may be missing.
    pub(crate) fn min_data_len(&self, height: u32) -> usize {
        (height as usize - 1) * self.stride + self.row_bytes
    }
}
