//! BMP header codec: the 14-byte file header and the 40-byte
//! BITMAPINFOHEADER, plus whole-file decode glue (internal).
//!
//! Only uncompressed, bottom-up, 24-bit images are accepted.

mod decode;
mod encode;
mod utils;

pub use decode::{decode_dib_header, decode_file_header};
pub use encode::{encode_dib_header, encode_file_header};
pub(crate) use utils::Geometry;

use crate::buffer::PixelBuffer;
use crate::error::BitmapError;
use crate::limits::Limits;
use enough::Stop;

/// Size of the file header ("BM", size, reserved, offset).
pub const FILE_HEADER_SIZE: usize = 14;
/// Size of the only supported DIB header variant (BITMAPINFOHEADER).
pub const DIB_HEADER_SIZE: usize = 40;
/// Offset of the first pixel byte in every file this crate writes.
pub const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + DIB_HEADER_SIZE;

/// Default resolution written for new images: 2835 px/m (72 DPI).
pub const DEFAULT_PIXELS_PER_METER: i32 = 2835;

/// Decoded BMP file header.
///
/// The two reserved fields are ignored on read and written as zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHeader {
    /// Total file size in bytes.
    pub file_size: u32,
    /// Byte offset from the start of the file to the first pixel byte.
    pub data_offset: u32,
}

impl FileHeader {
    /// Header describing `buffer` as written by this crate.
    pub fn for_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            file_size: (PIXEL_DATA_OFFSET + buffer.data_size()) as u32,
            data_offset: PIXEL_DATA_OFFSET as u32,
        }
    }
}

/// Decoded BITMAPINFOHEADER.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DibHeader {
    pub width: i32,
    /// Always positive: rows are stored bottom-up.
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// Size of the pixel array in bytes, including row padding.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl DibHeader {
    /// Fresh header for `buffer` with default resolution and no palette.
    pub fn for_buffer(buffer: &PixelBuffer) -> Self {
        Self {
            width: 0,
            height: 0,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size: 0,
            x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            colors_used: 0,
            important_colors: 0,
        }
        .with_geometry(buffer)
    }

    /// Copy of this header with the geometry fields taken from `buffer`.
    ///
    /// Resolution and color counters pass through unchanged.
    pub fn with_geometry(self, buffer: &PixelBuffer) -> Self {
        Self {
            width: buffer.width() as i32,
            height: buffer.height() as i32,
            planes: 1,
            bits_per_pixel: 24,
            compression: 0,
            image_size: buffer.data_size() as u32,
            ..self
        }
    }
}

/// Decode a whole BMP file into its DIB header and pixel grid.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<(DibHeader, PixelBuffer), BitmapError> {
    let file = decode_file_header(data)?;
    let dib = decode_dib_header(&data[FILE_HEADER_SIZE..])?;

    // decode_dib_header guarantees both dimensions are positive.
    let width = dib.width as u32;
    let height = dib.height as u32;
    let geometry = Geometry::new(width, height)?;
    if let Some(limits) = limits {
        limits.check(width, height, &geometry)?;
    }
    log::debug!(
        "BMP {width}x{height}, data offset {}, declared size {}, stride {}",
        file.data_offset,
        file.file_size,
        geometry.stride
    );

    stop.check()?;
    let pixel_data = data
        .get(file.data_offset as usize..)
        .ok_or(BitmapError::Truncated)?;
    let buffer = PixelBuffer::decode_with_stop(pixel_data, width, height, stop)?;
    Ok((dib.with_geometry(&buffer), buffer))
}

/// Encode a whole BMP file: file header, DIB header, then pixel rows.
pub(crate) fn encode(dib: &DibHeader, buffer: &PixelBuffer) -> alloc::vec::Vec<u8> {
    let mut out = alloc::vec::Vec::with_capacity(PIXEL_DATA_OFFSET + buffer.data_size());
    out.extend_from_slice(&encode_file_header(buffer));
    out.extend_from_slice(&encode_dib_header(dib, buffer));
    out.extend_from_slice(&buffer.encode());
    log::debug!(
        "encoded BMP {}x{} into {} bytes",
        buffer.width(),
        buffer.height(),
        out.len()
    );
    out
}
