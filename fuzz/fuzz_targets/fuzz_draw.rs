#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpline::*;

fuzz_target!(|input: (u8, u8, [i32; 4])| {
    let (w, h, [x1, y1, x2, y2]) = input;
    let Ok(mut image) = BitmapImage::new(u32::from(w), u32::from(h), Pixel::WHITE) else {
        return;
    };
    let before = image.clone();
    let (start, end) = (Point::new(x1, y1), Point::new(x2, y2));

    match image.draw(start, end) {
        Ok(()) => {
            // Only the segment's pixels may change, and both endpoints must.
            assert_eq!(image.buffer().get(start), Some(DRAW_COLOR));
            assert_eq!(image.buffer().get(end), Some(DRAW_COLOR));
            let drawn = image.buffer().pixels().iter().filter(|&&p| p == DRAW_COLOR).count();
            assert_eq!(drawn, raster::line_points(start, end).count());
        }
        Err(BitmapError::OutOfBounds { .. }) => assert_eq!(image, before),
        Err(e) => panic!("unexpected draw error: {e}"),
    }
});
