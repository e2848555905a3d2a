#![no_main]
use libfuzzer_sys::fuzz_target;
use bmpline::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding and decoding again must produce identical pixels
    let Ok(decoded) = DecodeRequest::new(data).decode(enough::Unstoppable) else {
        return;
    };

    let reencoded = decoded.encode();
    assert_eq!(reencoded.len(), decoded.file_header().file_size as usize);
    let Ok(decoded2) = BitmapImage::decode(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.buffer(), decoded2.buffer(), "roundtrip pixel mismatch");
    assert_eq!(reencoded, decoded2.encode(), "re-encode not byte-identical");
});
