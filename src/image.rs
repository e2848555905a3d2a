//! [`BitmapImage`]: headers plus pixels, with file I/O, line drawing and a
//! text preview.

use alloc::vec::Vec;
use core::fmt;

use crate::bmp::{self, DibHeader, FileHeader};
use crate::buffer::PixelBuffer;
use crate::decode::DecodeRequest;
use crate::error::BitmapError;
use crate::pixel::{DRAW_COLOR, Pixel, Point};
use crate::raster;

/// A 24-bit BMP image: headers and pixel grid kept in step.
///
/// The headers always describe the buffer: width, height, image size and
/// file size are derived from it, while resolution and color counters pass
/// through from the decoded file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitmapImage {
    file: FileHeader,
    dib: DibHeader,
    buffer: PixelBuffer,
}

impl Default for BitmapImage {
    /// A single white pixel.
    fn default() -> Self {
        Self::from_buffer(PixelBuffer::single(Pixel::WHITE))
    }
}

impl BitmapImage {
    /// A blank `width` x `height` image filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Pixel) -> Result<Self, BitmapError> {
        PixelBuffer::new(width, height, fill).map(Self::from_buffer)
    }

    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            file: FileHeader::for_buffer(&buffer),
            dib: DibHeader::for_buffer(&buffer),
            buffer,
        }
    }

    pub(crate) fn from_parts(dib: DibHeader, buffer: PixelBuffer) -> Self {
        Self {
            file: FileHeader::for_buffer(&buffer),
            dib: dib.with_geometry(&buffer),
            buffer,
        }
    }

    /// Decode a complete BMP file held in memory.
    pub fn decode(data: &[u8]) -> Result<Self, BitmapError> {
        DecodeRequest::new(data).decode(enough::Unstoppable)
    }

    /// Encode to a complete BMP file: file header, DIB header, pixel rows.
    pub fn encode(&self) -> Vec<u8> {
        bmp::encode(&self.dib, &self.buffer)
    }

    /// Replace this image with one read from `source`.
    ///
    /// On any error `self` is left exactly as it was.
    #[cfg(feature = "std")]
    pub fn read<R: std::io::Read + ?Sized>(&mut self, source: &mut R) -> Result<(), BitmapError> {
        *self = Self::from_reader(source)?;
        Ok(())
    }

    /// Read a whole BMP file from `source`.
    #[cfg(feature = "std")]
    pub fn from_reader<R: std::io::Read + ?Sized>(source: &mut R) -> Result<Self, BitmapError> {
        let mut data = Vec::new();
        source
            .read_to_end(&mut data)
            .map_err(BitmapError::SourceReadFailure)?;
        Self::decode(&data)
    }

    /// Write this image as a BMP file to `sink`.
    #[cfg(feature = "std")]
    pub fn write<W: std::io::Write + ?Sized>(&self, sink: &mut W) -> Result<(), BitmapError> {
        self.write_parts(sink)
            .map_err(BitmapError::SinkWriteFailure)?;
        log::debug!(
            "wrote {}x{} BMP, {} bytes",
            self.width(),
            self.height(),
            self.file.file_size
        );
        Ok(())
    }

    #[cfg(feature = "std")]
    fn write_parts<W: std::io::Write + ?Sized>(&self, sink: &mut W) -> std::io::Result<()> {
        sink.write_all(&bmp::encode_file_header(&self.buffer))?;
        sink.write_all(&bmp::encode_dib_header(&self.dib, &self.buffer))?;
        sink.write_all(&self.buffer.encode())?;
        sink.flush()
    }

    /// Draw a line in [`DRAW_COLOR`] from `start` to `end`, both inclusive.
    ///
    /// Fails with [`BitmapError::OutOfBounds`] without touching any pixel if
    /// either endpoint lies outside the image.
    pub fn draw(&mut self, start: Point, end: Point) -> Result<(), BitmapError> {
        self.draw_with(start, end, DRAW_COLOR)
    }

    /// [`draw`](Self::draw) with an explicit color.
    pub fn draw_with(&mut self, start: Point, end: Point, color: Pixel) -> Result<(), BitmapError> {
        raster::draw_line(&mut self.buffer, start, end, color)
    }

    /// Glyph-per-pixel text rendering, rendered lazily when formatted.
    pub fn print(&self) -> Preview<'_> {
        self.preview(PreviewStyle::Glyph)
    }

    pub fn preview(&self, style: PreviewStyle) -> Preview<'_> {
        Preview {
            buffer: &self.buffer,
            style,
        }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file
    }

    pub fn dib_header(&self) -> &DibHeader {
        &self.dib
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}

/// How [`Preview`] renders each pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PreviewStyle {
    /// One character per pixel, darker pixels denser (`@` black, `.` white).
    #[default]
    Glyph,
    /// `[bbb,ggg,rrr]` per pixel, in storage channel order.
    Triple,
}

/// Dense to sparse.
const GLYPH_RAMP: &[u8] = b"@%#*+=-:,.";

fn glyph(px: Pixel) -> char {
    let idx = usize::from(px.luma()) * (GLYPH_RAMP.len() - 1) / 255;
    char::from(GLYPH_RAMP[idx])
}

/// Read-only text projection of an image, rows top-down, one line per row.
#[derive(Clone, Copy, Debug)]
pub struct Preview<'a> {
    buffer: &'a PixelBuffer,
    style: PreviewStyle,
}

impl fmt::Display for Preview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.buffer.rows() {
            for &px in row {
                match self.style {
                    PreviewStyle::Glyph => write!(f, "{}", glyph(px))?,
                    PreviewStyle::Triple => write!(f, "[{:3},{:3},{:3}]", px.b, px.g, px.r)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
