use crate::bmp::Geometry;
use crate::error::BitmapError;

/// Caps applied to a file's declared geometry before any pixel memory is
/// allocated.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the decoded grid (3 per pixel).
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Only cap the pixel count.
    pub fn pixels(max_pixels: u64) -> Self {
        Self {
            max_pixels: Some(max_pixels),
            ..Self::default()
        }
    }

    pub(crate) fn check(
        &self,
        width: u32,
        height: u32,
        geometry: &Geometry,
    ) -> Result<(), BitmapError> {
        let pixels = u64::from(width) * u64::from(height);
        let memory = geometry.pixel_bytes as u64;
        let checks = [
            ("width", u64::from(width), self.max_width),
            ("height", u64::from(height), self.max_height),
            ("pixel count", pixels, self.max_pixels),
            ("decoded size in bytes", memory, self.max_memory_bytes),
        ];
        for (what, value, limit) in checks {
            if let Some(max) = limit.filter(|&max| value > max) {
                return Err(BitmapError::LimitExceeded(alloc::format!(
                    "{what} {value} exceeds limit {max}"
                )));
            }
        }
        Ok(())
    }
}
