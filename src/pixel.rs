/// One 24-bit pixel, channels in BMP storage order (blue, green, red).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(C)]
pub struct Pixel {
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Pixel {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a pixel from conventional red, green, blue intensities.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { b, g, r }
    }

    /// The three channel bytes as stored on disk.
    pub const fn to_bgr(self) -> [u8; 3] {
        [self.b, self.g, self.r]
    }

    pub const fn from_bgr(bgr: [u8; 3]) -> Self {
        Self {
            b: bgr[0],
            g: bgr[1],
            r: bgr[2],
        }
    }

    /// Integer Rec. 601 luma, 0–255.
    pub fn luma(self) -> u8 {
        let y = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        (y / 1000) as u8
    }
}

/// Color the rasterizer writes for a drawn line.
///
/// Drawn pixels are overwritten with this value, never blended.
pub const DRAW_COLOR: Pixel = Pixel::BLACK;

#[cfg(feature = "rgb")]
impl From<rgb::Rgb<u8>> for Pixel {
    fn from(px: rgb::Rgb<u8>) -> Self {
        Self::new(px.r, px.g, px.b)
    }
}

#[cfg(feature = "rgb")]
impl From<Pixel> for rgb::Rgb<u8> {
    fn from(px: Pixel) -> Self {
        rgb::Rgb {
            r: px.r,
            g: px.g,
            b: px.b,
        }
    }
}

/// Image-space coordinate. `(0, 0)` is the top-left pixel.
///
/// Signed so that negative input is representable and rejected as out of
/// bounds instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the point addresses a pixel of a `width` x `height` image.
    pub fn is_within(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
