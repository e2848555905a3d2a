#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp_24bit(width: i32, height: i32, pixel_bytes: &[u8]) -> Vec<u8> {
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(54 + pixel_bytes.len() as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[34..38].copy_from_slice(&(pixel_bytes.len() as u32).to_le_bytes()); // image size
    bmp.extend_from_slice(pixel_bytes);
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1, 3 bytes + 1 padding
    fs::write(format!("{dir}/bmp_1x1.bmp"), bmp_24bit(1, 1, &[0xff, 0x00, 0x00, 0x00])).unwrap();

    // 2x2 white, 6 bytes + 2 padding per row
    let white_row = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00];
    let white = [white_row, white_row].concat();
    fs::write(format!("{dir}/bmp_2x2_white.bmp"), bmp_24bit(2, 2, &white)).unwrap();

    // 3x1, 9 bytes padded to 12
    let row = [1, 2, 3, 4, 5, 6, 7, 8, 9, 0, 0, 0];
    fs::write(format!("{dir}/bmp_3x1.bmp"), bmp_24bit(3, 1, &row)).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/top_down.bmp"), bmp_24bit(1, -1, &[0; 4])).unwrap();
    let mut paletted = bmp_24bit(1, 1, &[0; 4]);
    paletted[28..30].copy_from_slice(&8u16.to_le_bytes());
    fs::write(format!("{dir}/bpp8.bmp"), paletted).unwrap();

    println!("Generated seed corpus in {dir}/");
}
