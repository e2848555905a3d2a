//! # bmpline
//!
//! 24-bit BMP decoder and encoder with bounds-checked line drawing.
//!
//! Decoding flips the bottom-up, row-padded pixel array into a top-down
//! [`PixelBuffer`]; encoding reverses the transform and recomputes every
//! size field, so an image written after drawing is always self-consistent.
//!
//! ## Supported Files
//!
//! - 40-byte BITMAPINFOHEADER only
//! - 24 bits per pixel, uncompressed, positive (bottom-up) height
//!
//! ## Non-Goals
//!
//! - Palettes, RLE, bitfields, alpha channels
//! - Anti-aliased or wide lines
//! - Scaling, cropping, other formats
//!
//! ## Usage
//!
//! ```
//! use bmpline::{BitmapImage, DRAW_COLOR, Pixel, Point};
//!
//! let mut image = BitmapImage::new(4, 4, Pixel::WHITE)?;
//! image.draw(Point::new(0, 0), Point::new(3, 3))?;
//! assert_eq!(image.buffer().get(Point::new(2, 2)), Some(DRAW_COLOR));
//!
//! // Out-of-range endpoints are rejected and nothing is drawn.
//! assert!(image.draw(Point::new(0, 0), Point::new(4, 0)).is_err());
//!
//! let bytes = image.encode();
//! let decoded = BitmapImage::decode(&bytes)?;
//! assert_eq!(decoded, image);
//! println!("{}", decoded.print());
//! # Ok::<(), bmpline::BitmapError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod buffer;
mod error;
mod image;
mod limits;
mod pixel;

pub mod bmp;
pub mod raster;

mod decode;

// Re-exports
pub use buffer::PixelBuffer;
pub use decode::DecodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BitmapError;
pub use image::{BitmapImage, Preview, PreviewStyle};
pub use limits::Limits;
pub use pixel::{DRAW_COLOR, Pixel, Point};
