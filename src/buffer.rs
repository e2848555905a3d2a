//! Decoded pixel grid and its on-disk row layout.
//!
//! Pixels are kept top-down and row-major. BMP stores rows bottom-up, each
//! padded with zero bytes to a multiple of 4; [`PixelBuffer::decode`] and
//! [`PixelBuffer::encode`] are the only places that flip or pad.

use alloc::vec;
use alloc::vec::Vec;
use core::slice::ChunksExact;

use enough::{Stop, Unstoppable};

use crate::bmp::Geometry;
use crate::error::BitmapError;
use crate::pixel::{Pixel, Point};

/// Non-empty grid of 24-bit pixels, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    geometry: Geometry,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// A `width` x `height` buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Pixel) -> Result<Self, BitmapError> {
        let geometry = Geometry::new(width, height)?;
        Ok(Self {
            width,
            height,
            geometry,
            pixels: vec![fill; width as usize * height as usize],
        })
    }

    /// A 1x1 buffer; cannot fail.
    pub(crate) fn single(px: Pixel) -> Self {
        Self {
            width: 1,
            height: 1,
            geometry: Geometry {
                row_bytes: 3,
                stride: 4,
                data_size: 4,
                pixel_bytes: 3,
            },
            pixels: vec![px],
        }
    }

    /// Wrap top-down, row-major pixels.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, BitmapError> {
        let geometry = Geometry::new(width, height)?;
        let needed = width as usize * height as usize;
        if pixels.len() != needed {
            return Err(BitmapError::BufferSizeMismatch {
                needed,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            geometry,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Padded bytes per row on disk.
    pub fn stride(&self) -> usize {
        self.geometry.stride
    }

    /// Bytes [`encode`](Self::encode) produces: `height * stride`.
    pub fn data_size(&self) -> usize {
        self.geometry.data_size
    }

    /// All pixels, top-down and row-major.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn rows(&self) -> ChunksExact<'_, Pixel> {
        self.pixels.chunks_exact(self.width as usize)
    }

    pub fn row(&self, y: u32) -> Option<&[Pixel]> {
        self.rows().nth(y as usize)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.is_within(self.width, self.height)
    }

    pub fn get(&self, point: Point) -> Option<Pixel> {
        self.index(point).map(|i| self.pixels[i])
    }

    pub fn get_mut(&mut self, point: Point) -> Option<&mut Pixel> {
        self.index(point).map(move |i| &mut self.pixels[i])
    }

    fn index(&self, point: Point) -> Option<usize> {
        self.contains(point)
            .then(|| point.y as usize * self.width as usize + point.x as usize)
    }

    /// Decode a bottom-up, row-padded BGR pixel array.
    ///
    /// `data` starts at the first pixel byte. Bytes past the pixel array are
    /// ignored, and the padding after the final row may be absent.
    pub fn decode(data: &[u8], width: u32, height: u32) -> Result<Self, BitmapError> {
        Self::decode_with_stop(data, width, height, &Unstoppable)
    }

    /// [`decode`](Self::decode), checking `stop` every 16 rows.
    pub fn decode_with_stop(
        data: &[u8],
        width: u32,
        height: u32,
        stop: &dyn Stop,
    ) -> Result<Self, BitmapError> {
        let geometry = Geometry::new(width, height)?;
        if data.len() < geometry.min_data_len(height) {
            return Err(BitmapError::Truncated);
        }

        let h = height as usize;
        let mut pixels = Vec::with_capacity(width as usize * h);
        for y in 0..h {
            if y % 16 == 0 {
                stop.check()?;
            }
            let start = (h - 1 - y) * geometry.stride;
            let row = &data[start..start + geometry.row_bytes];
            pixels.extend(
                row.chunks_exact(3)
                    .map(|bgr| Pixel::from_bgr([bgr[0], bgr[1], bgr[2]])),
            );
        }

        Ok(Self {
            width,
            height,
            geometry,
            pixels,
        })
    }

    /// Encode to a bottom-up, row-padded BGR pixel array of exactly
    /// [`data_size`](Self::data_size) bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data_size());
        for y in (0..self.height as usize).rev() {
            self.push_disk_row(&mut out, y);
        }
        out
    }

    /// [`encode`](Self::encode), checking `stop` every 16 rows.
    pub fn encode_with_stop(&self, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
        let mut out = Vec::with_capacity(self.data_size());
        for (row, y) in (0..self.height as usize).rev().enumerate() {
            if row % 16 == 0 {
                stop.check()?;
            }
            self.push_disk_row(&mut out, y);
        }
        Ok(out)
    }

    fn push_disk_row(&self, out: &mut Vec<u8>, y: usize) {
        let w = self.width as usize;
        for px in &self.pixels[y * w..(y + 1) * w] {
            out.extend_from_slice(&px.to_bgr());
        }
        let pad_bytes = self.geometry.stride - self.geometry.row_bytes;
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Pixel> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }

    /// Copy into an [`imgref::ImgVec`] of [`rgb::Rgb<u8>`] pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec(&self) -> imgref::ImgVec<rgb::Rgb<u8>> {
        imgref::ImgVec::new(
            self.pixels.iter().map(|&px| rgb::Rgb::from(px)).collect(),
            self.width as usize,
            self.height as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| Pixel::new(x as u8, y as u8, (x * 7 + y) as u8)))
            .collect();
        PixelBuffer::from_pixels(width, height, pixels).unwrap()
    }

    #[test]
    fn three_wide_row_pads_to_twelve_bytes() {
        let buffer = PixelBuffer::from_pixels(
            3,
            1,
            vec![
                Pixel::new(1, 2, 3),
                Pixel::new(4, 5, 6),
                Pixel::new(7, 8, 9),
            ],
        )
        .unwrap();
        assert_eq!(
            buffer.encode(),
            vec![3, 2, 1, 6, 5, 4, 9, 8, 7, 0, 0, 0]
        );
    }

    #[test]
    fn encode_flips_rows() {
        let buffer = PixelBuffer::from_pixels(
            1,
            2,
            vec![Pixel::new(0xAA, 0, 0), Pixel::new(0, 0, 0xBB)],
        )
        .unwrap();
        // Bottom row first on disk.
        assert_eq!(buffer.encode(), vec![0xBB, 0, 0, 0, 0, 0, 0xAA, 0]);
    }

    #[test]
    fn decode_flips_rows_and_drops_padding() {
        let data = [
            0x01, 0x02, 0x03, 0xEE, // disk row 0 = bottom
            0x04, 0x05, 0x06, 0xEE, // disk row 1 = top
        ];
        let buffer = PixelBuffer::decode(&data, 1, 2).unwrap();
        assert_eq!(buffer.get(Point::new(0, 0)), Some(Pixel::from_bgr([4, 5, 6])));
        assert_eq!(buffer.get(Point::new(0, 1)), Some(Pixel::from_bgr([1, 2, 3])));
    }

    #[test]
    fn decode_encode_roundtrip() {
        for (w, h) in [(1, 1), (2, 3), (3, 2), (4, 4), (5, 17), (17, 5)] {
            let buffer = gradient(w, h);
            let encoded = buffer.encode();
            assert_eq!(encoded.len(), buffer.data_size());
            assert_eq!(PixelBuffer::decode(&encoded, w, h).unwrap(), buffer);
        }
    }

    #[test]
    fn decode_accepts_missing_final_padding() {
        let buffer = gradient(2, 2);
        let encoded = buffer.encode();
        let trimmed = &encoded[..encoded.len() - 2];
        assert_eq!(PixelBuffer::decode(trimmed, 2, 2).unwrap(), buffer);
    }

    #[test]
    fn decode_truncated() {
        let encoded = gradient(2, 2).encode();
        assert!(matches!(
            PixelBuffer::decode(&encoded[..13], 2, 2),
            Err(BitmapError::Truncated)
        ));
        assert!(matches!(
            PixelBuffer::decode(&[], 1, 1),
            Err(BitmapError::Truncated)
        ));
    }

    #[test]
    fn single_matches_new() {
        assert_eq!(
            PixelBuffer::single(Pixel::WHITE),
            PixelBuffer::new(1, 1, Pixel::WHITE).unwrap()
        );
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(matches!(
            PixelBuffer::from_pixels(2, 2, vec![Pixel::WHITE; 3]),
            Err(BitmapError::BufferSizeMismatch { needed: 4, actual: 3 })
        ));
    }

    #[test]
    fn accessors_respect_bounds() {
        let mut buffer = PixelBuffer::new(2, 3, Pixel::WHITE).unwrap();
        *buffer.get_mut(Point::new(1, 2)).unwrap() = Pixel::BLACK;
        assert_eq!(buffer.row(2), Some(&[Pixel::WHITE, Pixel::BLACK][..]));
        assert_eq!(buffer.get(Point::new(2, 0)), None);
        assert_eq!(buffer.get(Point::new(0, -1)), None);
        assert!(buffer.get_mut(Point::new(0, 3)).is_none());
        assert_eq!(buffer.rows().len(), 3);
    }

    #[test]
    fn encode_with_stop_matches_encode() {
        let buffer = gradient(9, 33);
        assert_eq!(buffer.encode_with_stop(&Unstoppable).unwrap(), buffer.encode());
    }

    /// Counts `check` calls and cancels on the `fail_at`-th one.
    struct CountingStop {
        calls: AtomicUsize,
        fail_at: usize,
    }

    impl CountingStop {
        fn new(fail_at: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_at,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::Relaxed)
        }
    }

    impl Stop for CountingStop {
        fn check(&self) -> Result<(), enough::StopReason> {
            let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
            if n == self.fail_at {
                Err(enough::StopReason::Cancelled)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn encode_with_stop_checks_before_first_row() {
        let buffer = gradient(4, 3);
        let stop = CountingStop::new(1);
        assert!(matches!(
            buffer.encode_with_stop(&stop),
            Err(BitmapError::Cancelled(_))
        ));
        assert_eq!(stop.calls(), 1);
    }

    #[test]
    fn encode_with_stop_checks_every_sixteen_rows() {
        let buffer = gradient(2, 33);
        let stop = CountingStop::new(usize::MAX);
        buffer.encode_with_stop(&stop).unwrap();
        // Rows 0, 16 and 32 in write order.
        assert_eq!(stop.calls(), 3);

        let stop = CountingStop::new(usize::MAX);
        PixelBuffer::decode_with_stop(&buffer.encode(), 2, 33, &stop).unwrap();
        assert_eq!(stop.calls(), 3);
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_views_are_top_down_rgb() {
        let buffer = gradient(3, 2);
        let view = buffer.as_imgref();
        assert_eq!((view.width(), view.height()), (3, 2));
        assert_eq!(view[(2usize, 1usize)], Pixel::new(2, 1, 15));

        let owned = buffer.to_imgvec();
        assert_eq!((owned.width(), owned.height()), (3, 2));
        let px = owned[(2usize, 1usize)];
        assert_eq!((px.r, px.g, px.b), (2, 1, 15));
        assert_eq!(owned.buf().len(), 6);
    }
}
