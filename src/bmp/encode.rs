//! File header and BITMAPINFOHEADER serialization.

use crate::buffer::PixelBuffer;

use super::{DIB_HEADER_SIZE, DibHeader, FILE_HEADER_SIZE, FileHeader};

/// Serialize the file header for `buffer`.
///
/// The size field is computed from the buffer, never copied from a decoded
/// header, so the output stays consistent after drawing.
pub fn encode_file_header(buffer: &PixelBuffer) -> [u8; FILE_HEADER_SIZE] {
    let header = FileHeader::for_buffer(buffer);
    let mut out = [0u8; FILE_HEADER_SIZE];
    out[0..2].copy_from_slice(b"BM");
    out[2..6].copy_from_slice(&header.file_size.to_le_bytes());
    // 6..10 reserved, left zero
    out[10..14].copy_from_slice(&header.data_offset.to_le_bytes());
    out
}

/// Serialize a BITMAPINFOHEADER for `buffer`.
///
/// Geometry (width, height, planes, depth, compression, image size) comes
/// from the buffer; resolution and color counters come from `dib`.
pub fn encode_dib_header(dib: &DibHeader, buffer: &PixelBuffer) -> [u8; DIB_HEADER_SIZE] {
    let dib = dib.with_geometry(buffer);
    let mut out = [0u8; DIB_HEADER_SIZE];
    out[0..4].copy_from_slice(&(DIB_HEADER_SIZE as u32).to_le_bytes());
    out[4..8].copy_from_slice(&dib.width.to_le_bytes());
    out[8..12].copy_from_slice(&dib.height.to_le_bytes()); // positive = bottom-up
    out[12..14].copy_from_slice(&dib.planes.to_le_bytes());
    out[14..16].copy_from_slice(&dib.bits_per_pixel.to_le_bytes());
    out[16..20].copy_from_slice(&dib.compression.to_le_bytes());
    out[20..24].copy_from_slice(&dib.image_size.to_le_bytes());
    out[24..28].copy_from_slice(&dib.x_pixels_per_meter.to_le_bytes());
    out[28..32].copy_from_slice(&dib.y_pixels_per_meter.to_le_bytes());
    out[32..36].copy_from_slice(&dib.colors_used.to_le_bytes());
    out[36..40].copy_from_slice(&dib.important_colors.to_le_bytes());
    out
}
