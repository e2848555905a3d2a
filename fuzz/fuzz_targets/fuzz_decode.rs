#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the input
    let _ = bmpline::BitmapImage::decode(data);
    let _ = bmpline::bmp::decode_file_header(data);
    if data.len() > 14 {
        let _ = bmpline::bmp::decode_dib_header(&data[14..]);
    }
});
