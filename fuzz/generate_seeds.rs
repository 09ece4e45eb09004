#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(header_size: u32, width: i32, height: i32, bpp: u16, compression: u32, palette: &[[u8; 4]], pixels: &[u8]) -> Vec<u8> {
    let offset = 14 + header_size + palette.len() as u32 * 4;
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(offset + pixels.len() as u32).to_le_bytes()); // file size
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&offset.to_le_bytes()); // data offset
    out.extend_from_slice(&header_size.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&bpp.to_le_bytes());
    out.extend_from_slice(&compression.to_le_bytes());
    out.extend_from_slice(&(pixels.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 8]); // resolution
    out.extend_from_slice(&(palette.len() as u32).to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes());
    if header_size == 124 {
        for mask in [0x00FF_0000u32, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000] {
            out.extend_from_slice(&mask.to_le_bytes());
        }
        out.extend_from_slice(&0x7352_4742u32.to_le_bytes()); // sRGB
        out.extend_from_slice(&[0u8; 48]); // endpoints, gamma
        out.extend_from_slice(&4u32.to_le_bytes()); // intent
        out.extend_from_slice(&[0u8; 12]);
    }
    for entry in palette {
        out.extend_from_slice(entry);
    }
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let mono = [[0, 0, 0, 0], [255, 255, 255, 0]];
    let gray16: Vec<[u8; 4]> = (0..16).map(|i| [i * 17, i * 17, i * 17, 0]).collect();

    // 1x1 24-bit
    fs::write(format!("{dir}/bgr24_1x1.bmp"), bmp(40, 1, 1, 24, 0, &[], &[0xff, 0, 0, 0])).unwrap();
    // 2x2 24-bit, bottom-up
    let rows = [0, 0, 0xff, 0, 0xff, 0, 0, 0, 0xff, 0, 0, 0xff, 0xff, 0xff, 0, 0];
    fs::write(format!("{dir}/bgr24_2x2.bmp"), bmp(40, 2, 2, 24, 0, &[], &rows)).unwrap();
    // 8x2 1-bit
    fs::write(format!("{dir}/mono_8x2.bmp"), bmp(40, 8, 2, 1, 0, &mono, &[0xb0, 0, 0, 0, 0x0f, 0, 0, 0])).unwrap();
    // 3x1 4-bit, short palette
    fs::write(format!("{dir}/nibble_3x1.bmp"), bmp(40, 3, 1, 4, 0, &gray16[..5], &[0x12, 0x40, 0, 0])).unwrap();
    // 5x1 8-bit, top-down
    fs::write(format!("{dir}/index8_topdown.bmp"), bmp(40, 5, -1, 8, 0, &gray16, &[1, 2, 3, 4, 5, 0, 0, 0])).unwrap();
    // 1x1 32-bit v5 bitfields
    fs::write(format!("{dir}/bgra32_v5.bmp"), bmp(124, 1, 1, 32, 3, &[], &[1, 2, 3, 4])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/rle8.bmp"), bmp(40, 2, 1, 8, 1, &gray16, &[0, 0, 1, 0])).unwrap();
    fs::write(format!("{dir}/core_os2.bmp"), bmp(12, 1, 1, 24, 0, &[], &[0, 0, 0, 0])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
