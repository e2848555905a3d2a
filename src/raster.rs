//! Integer line rasterization.

use crate::buffer::PixelBuffer;
use crate::error::BitmapError;
use crate::pixel::{Pixel, Point};

/// Iterator over the pixels of the segment from `start` to `end`, both
/// inclusive, in drawing order.
///
/// Classic Bresenham with a symmetric error term; no floating point.
#[derive(Clone, Debug)]
pub struct LinePoints {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

/// Pixels covered by the segment `start`..=`end`.
pub fn line_points(start: Point, end: Point) -> LinePoints {
    let (x0, y0) = (i64::from(start.x), i64::from(start.y));
    let (x1, y1) = (i64::from(end.x), i64::from(end.y));
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    LinePoints {
        x: x0,
        y: y0,
        end_x: x1,
        end_y: y1,
        dx,
        dy,
        sx: if x0 < x1 { 1 } else { -1 },
        sy: if y0 < y1 { 1 } else { -1 },
        err: dx - dy,
        done: false,
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        // Every visited coordinate lies between the two i32 endpoints.
        let current = Point::new(self.x as i32, self.y as i32);
        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        // At most 2^32 points, which overflows a 32-bit usize.
        let remaining = (self.end_x - self.x).abs().max((self.end_y - self.y).abs()) + 1;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl core::iter::FusedIterator for LinePoints {}

fn check_bounds(buffer: &PixelBuffer, point: Point) -> Result<(), BitmapError> {
    if buffer.contains(point) {
        Ok(())
    } else {
        Err(BitmapError::OutOfBounds {
            point,
            width: buffer.width(),
            height: buffer.height(),
        })
    }
}

/// Overwrite every pixel of the segment `start`..=`end` with `color`.
///
/// Both endpoints are validated before anything is written, so an
/// out-of-bounds request leaves `buffer` untouched.
pub fn draw_line(
    buffer: &mut PixelBuffer,
    start: Point,
    end: Point,
    color: Pixel,
) -> Result<(), BitmapError> {
    check_bounds(buffer, start)?;
    check_bounds(buffer, end)?;

    let mut plotted = 0usize;
    for point in line_points(start, end) {
        if let Some(px) = buffer.get_mut(point) {
            *px = color;
            plotted += 1;
        }
    }
    log::trace!(
        "drew ({}, {})-({}, {}): {plotted} pixels",
        start.x,
        start.y,
        end.x,
        end.y
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn points(a: (i32, i32), b: (i32, i32)) -> Vec<(i32, i32)> {
        line_points(a.into(), b.into()).map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn horizontal_line_is_inclusive() {
        assert_eq!(
            points((0, 0), (4, 0)),
            [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]
        );
    }

    #[test]
    fn single_point() {
        assert_eq!(points((3, 2), (3, 2)), [(3, 2)]);
    }

    #[test]
    fn vertical_and_reversed() {
        assert_eq!(points((1, 3), (1, 0)), [(1, 3), (1, 2), (1, 1), (1, 0)]);
        assert_eq!(points((2, 0), (0, 0)), [(2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn diagonal() {
        assert_eq!(points((0, 0), (3, 3)), [(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(points((3, 0), (0, 3)), [(3, 0), (2, 1), (1, 2), (0, 3)]);
    }

    #[test]
    fn shallow_slope_steps_once_per_column() {
        let pts = points((0, 0), (6, 2));
        assert_eq!(pts.len(), 7);
        assert_eq!(pts.first(), Some(&(0, 0)));
        assert_eq!(pts.last(), Some(&(6, 2)));
        for pair in pts.windows(2) {
            assert_eq!(pair[1].0 - pair[0].0, 1);
            assert!((0..=1).contains(&(pair[1].1 - pair[0].1)));
        }
    }

    #[test]
    fn steep_slope_steps_once_per_row() {
        let pts = points((1, 0), (0, 5));
        assert_eq!(pts.len(), 6);
        for pair in pts.windows(2) {
            assert_eq!(pair[1].1 - pair[0].1, 1);
        }
    }

    #[test]
    fn size_hint_counts_remaining_points() {
        let mut it = line_points(Point::new(0, 0), Point::new(5, 2));
        assert_eq!(it.size_hint(), (6, Some(6)));
        it.next();
        assert_eq!(it.size_hint(), (5, Some(5)));
        assert_eq!(it.by_ref().count(), 5);
        assert_eq!(it.size_hint(), (0, Some(0)));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn size_hint_of_full_i32_span() {
        let it = line_points(Point::new(i32::MIN, 0), Point::new(i32::MAX, 0));
        let points = 1u64 << 32;
        match usize::try_from(points) {
            Ok(n) => assert_eq!(it.size_hint(), (n, Some(n))),
            Err(_) => assert_eq!(it.size_hint(), (usize::MAX, None)),
        }
    }

    #[test]
    fn draw_rejects_out_of_bounds_without_writing() {
        let mut buffer = PixelBuffer::new(5, 3, Pixel::WHITE).unwrap();
        let before = buffer.clone();
        let err = draw_line(&mut buffer, Point::new(0, 0), Point::new(5, 0), Pixel::BLACK);
        assert!(matches!(
            err,
            Err(BitmapError::OutOfBounds {
                point: Point { x: 5, y: 0 },
                width: 5,
                height: 3
            })
        ));
        assert_eq!(buffer, before);

        let err = draw_line(&mut buffer, Point::new(-1, 0), Point::new(2, 2), Pixel::BLACK);
        assert!(matches!(err, Err(BitmapError::OutOfBounds { .. })));
        assert_eq!(buffer, before);
    }

    #[test]
    fn draw_is_idempotent() {
        let mut once = PixelBuffer::new(6, 6, Pixel::WHITE).unwrap();
        draw_line(&mut once, Point::new(0, 5), Point::new(5, 1), Pixel::BLACK).unwrap();
        let mut twice = once.clone();
        draw_line(&mut twice, Point::new(0, 5), Point::new(5, 1), Pixel::BLACK).unwrap();
        assert_eq!(once, twice);
    }
}
