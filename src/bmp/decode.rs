//! File header and BITMAPINFOHEADER parsing.

use crate::error::BitmapError;

use super::{DIB_HEADER_SIZE, DibHeader, FILE_HEADER_SIZE, FileHeader, PIXEL_DATA_OFFSET};

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BitmapError> {
        let end = self.pos.checked_add(N).ok_or(BitmapError::Truncated)?;
        let bytes = self.data.get(self.pos..end).ok_or(BitmapError::Truncated)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BitmapError> {
        self.read_fixed_bytes().map(u16::from_le_bytes)
    }

    fn get_u32_le(&mut self) -> Result<u32, BitmapError> {
        self.read_fixed_bytes().map(u32::from_le_bytes)
    }

    fn get_i32_le(&mut self) -> Result<i32, BitmapError> {
        self.read_fixed_bytes().map(i32::from_le_bytes)
    }

    fn skip(&mut self, n: usize) -> Result<(), BitmapError> {
        let new_pos = self.pos.checked_add(n).ok_or(BitmapError::Truncated)?;
        if new_pos > self.data.len() {
            return Err(BitmapError::Truncated);
        }
        self.pos = new_pos;
        Ok(())
    }
}

// ── Header parsing ──────────────────────────────────────────────────

/// Parse the 14-byte file header at the start of `data`.
///
/// The signature is checked before the length of the rest of the header,
/// so two wrong bytes report [`BitmapError::BadSignature`] even when the
/// input is short.
pub fn decode_file_header(data: &[u8]) -> Result<FileHeader, BitmapError> {
    let mut bytes = Cursor::new(data);

    if bytes.read_fixed_bytes::<2>()? != *b"BM" {
        return Err(BitmapError::BadSignature);
    }
    let file_size = bytes.get_u32_le()?;
    // Reserved (2 x u16)
    bytes.skip(4)?;
    let data_offset = bytes.get_u32_le()?;
    debug_assert_eq!(bytes.pos, FILE_HEADER_SIZE);

    if (data_offset as usize) < PIXEL_DATA_OFFSET {
        return Err(BitmapError::InvalidDataOffset(data_offset));
    }

    Ok(FileHeader {
        file_size,
        data_offset,
    })
}

/// Parse a BITMAPINFOHEADER from the start of `data` (the bytes right after
/// the file header).
///
/// Checks run in order: length, header size, bit depth, compression,
/// dimensions.
pub fn decode_dib_header(data: &[u8]) -> Result<DibHeader, BitmapError> {
    if data.len() < DIB_HEADER_SIZE {
        return Err(BitmapError::Truncated);
    }
    let mut bytes = Cursor::new(data);

    let header_size = bytes.get_u32_le()?;
    let width = bytes.get_i32_le()?;
    let height = bytes.get_i32_le()?;
    let planes = bytes.get_u16_le()?;
    let bits_per_pixel = bytes.get_u16_le()?;
    let compression = bytes.get_u32_le()?;
    let image_size = bytes.get_u32_le()?;
    let x_pixels_per_meter = bytes.get_i32_le()?;
    let y_pixels_per_meter = bytes.get_i32_le()?;
    let colors_used = bytes.get_u32_le()?;
    let important_colors = bytes.get_u32_le()?;

    if header_size as usize != DIB_HEADER_SIZE {
        return Err(BitmapError::UnsupportedHeaderSize(header_size));
    }
    if bits_per_pixel != 24 {
        return Err(BitmapError::UnsupportedBitDepth(bits_per_pixel));
    }
    if compression != 0 {
        return Err(BitmapError::UnsupportedCompression(compression));
    }
    // Negative height means top-down storage, which is not supported.
    if width <= 0 || height <= 0 {
        return Err(BitmapError::InvalidDimensions { width, height });
    }
    if planes != 1 {
        log::debug!("ignoring BMP planes field {planes}");
    }

    Ok(DibHeader {
        width,
        height,
        planes,
        bits_per_pixel,
        compression,
        image_size,
        x_pixels_per_meter,
        y_pixels_per_meter,
        colors_used,
        important_colors,
    })
}
