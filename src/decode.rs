use enough::Stop;

use crate::bmp;
use crate::error::BitmapError;
use crate::image::BitmapImage;
use crate::limits::Limits;

/// Builder for decoding a BMP file held in memory.
///
/// ```
/// use bmpline::{DecodeRequest, Limits, Unstoppable};
///
/// # let data = bmpline::BitmapImage::default().encode();
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Default::default()
/// };
/// let image = DecodeRequest::new(&data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!(image.width(), 1);
/// # Ok::<(), bmpline::BitmapError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before allocating pixels.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode headers and pixels. `stop` is polled between row batches.
    pub fn decode(self, stop: impl Stop) -> Result<BitmapImage, BitmapError> {
        let (dib, buffer) = bmp::decode(self.data, self.limits, &stop)?;
        Ok(BitmapImage::from_parts(dib, buffer))
    }
}
