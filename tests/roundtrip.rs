use zenbmp::*;

fn checkerboard_rgb(w: u32, h: u32) -> Vec<u8> {
    let mut pixels = Vec::with_capacity((w * h * 3) as usize);
    for y in 0..h {
        for x in 0..w {
            if (x + y) % 2 == 0 {
                pixels.extend_from_slice(&[255, 0, 128]);
            } else {
                pixels.extend_from_slice(&[0, 200, 50]);
            }
        }
    }
    pixels
}

fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12345);
            (state >> 16) as u8
        })
        .collect()
}

fn palette(n: usize) -> Palette {
    Palette::new(
        (0..n)
            .map(|i| PaletteEntry::new(i as u8, (i * 7) as u8, 255 - i as u8))
            .collect(),
    )
}

fn indexed(w: u32, h: u32, colors: usize, seed: u32) -> PixelBuffer {
    let indices = noise((w * h) as usize, seed)
        .into_iter()
        .map(|v| (v as usize % colors) as u8)
        .collect();
    PixelBuffer::Indexed(IndexedImage::new(w, h, indices, palette(colors)).unwrap())
}

fn direct(w: u32, h: u32, layout: PixelLayout, samples: Vec<u8>) -> PixelBuffer {
    PixelBuffer::Direct(DirectImage::new(w, h, layout, samples).unwrap())
}

#[test]
fn bmp_roundtrip_rgb8() {
    let w = 3;
    let h = 2;
    let pixels = vec![
        255, 0, 0, 0, 255, 0, 0, 0, 255, // row 0: R G B
        128, 128, 128, 64, 64, 64, 0, 0, 0, // row 1: gray dark black
    ];

    let encoded = encode_bmp(&direct(w, h, PixelLayout::Rgb8, pixels.clone()), 24).unwrap();
    assert_eq!(&encoded[0..2], b"BM");
    // 14 + 40 header bytes, two 12-byte rows (9 data + 3 pad)
    assert_eq!(encoded.len(), 54 + 24);

    let decoded = decode_bmp(&encoded).unwrap();
    assert_eq!(decoded.width, w);
    assert_eq!(decoded.height, h);
    assert_eq!(decoded.layout(), PixelLayout::Rgb8);
    assert_eq!(decoded.pixels().samples(), &pixels[..]);
    assert_eq!(decoded.file_header.data_offset, 54);
    assert_eq!(decoded.file_header.file_size as usize, encoded.len());
}

#[test]
fn bmp_roundtrip_rgba8() {
    let w = 2;
    let h = 2;
    let pixels = vec![
        255, 0, 0, 255, 0, 255, 0, 128, // row 0
        0, 0, 255, 64, 128, 128, 128, 255, // row 1
    ];

    let encoded = encode_bmp(&direct(w, h, PixelLayout::Rgba8, pixels.clone()), 32).unwrap();
    let decoded = decode_bmp(&encoded).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgba8);
    assert_eq!(decoded.pixels().samples(), &pixels[..]);
    assert_eq!(decoded.info_header.compression(), Compression::Rgb);
}

#[test]
fn bmp_roundtrip_checkerboard_odd_widths() {
    for w in 1..9 {
        for h in 1..4 {
            let pixels = checkerboard_rgb(w, h);
            let encoded = encode_bmp(&direct(w, h, PixelLayout::Rgb8, pixels.clone()), 24).unwrap();
            let decoded = decode_bmp(&encoded).unwrap();
            assert_eq!(decoded.pixels().samples(), &pixels[..], "{w}x{h}");
        }
    }
}

#[test]
fn bmp_roundtrip_indexed_depths() {
    for (depth, colors) in [(1u16, 2usize), (4, 16), (4, 5), (8, 256), (8, 17)] {
        for (w, h) in [(1, 1), (7, 3), (13, 5), (32, 2)] {
            let src = indexed(w, h, colors, w * 31 + h);
            let encoded = encode_bmp(&src, depth).unwrap();
            let decoded = decode_bmp(&encoded).unwrap();
            assert_eq!(decoded.info_header.bit_depth(), depth);

            let got = decoded.pixels().as_indexed().unwrap();
            let want = src.as_indexed().unwrap();
            assert_eq!(got.indices(), want.indices(), "depth {depth} {w}x{h}");
            assert_eq!(got.palette(), want.palette());
            assert_eq!(got.bits_per_sample() as u16, depth);
        }
    }
}

#[test]
fn indexed_expanded_to_direct() {
    let src = indexed(5, 3, 16, 9);
    let expected_rgb = src.to_rgb8();

    let decoded = decode_bmp(&encode_bmp(&src, 24).unwrap()).unwrap();
    assert_eq!(decoded.layout(), PixelLayout::Rgb8);
    assert_eq!(decoded.pixels().samples(), &expected_rgb[..]);

    let decoded = decode_bmp(&encode_bmp(&src, 32).unwrap()).unwrap();
    assert_eq!(decoded.pixels().samples(), &src.to_rgba8()[..]);
}

#[test]
fn rgb_written_as_32bit_gains_opaque_alpha() {
    let pixels = checkerboard_rgb(3, 3);
    let src = direct(3, 3, PixelLayout::Rgb8, pixels);
    let decoded = decode_bmp(&encode_bmp(&src, 32).unwrap()).unwrap();
    assert_eq!(decoded.pixels().samples(), &src.to_rgba8()[..]);
}

#[test]
fn extended_header_roundtrip() {
    let pixels = noise(4 * 3 * 4, 7);
    let src = direct(4, 3, PixelLayout::Rgba8, pixels.clone());
    let encoded = EncodeRequest::new(32)
        .with_extended_header(true)
        .with_resolution(3780, 3780)
        .encode(&src)
        .unwrap();

    let decoded = decode_bmp(&encoded).unwrap();
    assert_eq!(decoded.pixels().samples(), &pixels[..]);
    assert_eq!(decoded.info_header.size(), EXTENDED_HEADER_SIZE);
    assert_eq!(decoded.info_header.compression(), Compression::Bitfields);
    assert_eq!(decoded.info_header.core().x_pixels_per_meter, 3780);

    let ext = decoded.info_header.extended().unwrap();
    assert_eq!(
        (ext.red_mask, ext.green_mask, ext.blue_mask, ext.alpha_mask),
        (0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000)
    );
}

#[test]
fn extended_header_indexed_has_no_masks() {
    let src = indexed(6, 2, 4, 3);
    let encoded = EncodeRequest::new(4)
        .with_extended_header(true)
        .encode(&src)
        .unwrap();
    let decoded = decode_bmp(&encoded).unwrap();
    let ext = decoded.info_header.extended().unwrap();
    assert_eq!(ext.red_mask, 0);
    assert_eq!(decoded.info_header.compression(), Compression::Rgb);
    assert_eq!(decoded.pixels().samples(), src.samples());
}

#[test]
fn headers_reserialize_byte_for_byte() {
    for extended in [false, true] {
        let src = indexed(9, 4, 16, 1);
        let encoded = EncodeRequest::new(4)
            .with_extended_header(extended)
            .encode(&src)
            .unwrap();
        let headers = read_headers(&encoded).unwrap();

        let mut out = Vec::new();
        headers.file_header.write_to(&mut out);
        headers.info_header.write_to(&mut out);
        headers.palette.as_ref().unwrap().write_to(&mut out);
        assert_eq!(out.len(), headers.file_header.data_offset as usize);
        assert_eq!(&out[..], &encoded[..out.len()]);
    }
}

#[test]
fn encoder_rejects_unrepresentable_requests() {
    let rgb = direct(2, 2, PixelLayout::Rgb8, vec![0; 12]);
    for depth in [1u16, 4, 8, 16, 0] {
        assert!(matches!(
            encode_bmp(&rgb, depth),
            Err(BmpError::UnsupportedEncode { .. })
        ));
    }
    // 17 colors do not fit in 4 bits.
    let wide = indexed(2, 2, 17, 0);
    assert!(matches!(
        encode_bmp(&wide, 4),
        Err(BmpError::UnsupportedEncode { .. })
    ));
    assert!(encode_bmp(&wide, 8).is_ok());
}

#[test]
fn encoder_rejects_empty_images() {
    let empty = direct(0, 3, PixelLayout::Rgb8, Vec::new());
    assert!(matches!(
        encode_bmp(&empty, 24),
        Err(BmpError::InvalidDimensions { .. })
    ));
}

#[test]
fn buffer_constructors_validate() {
    assert!(matches!(
        DirectImage::new(2, 2, PixelLayout::Rgb8, vec![0; 11]),
        Err(BmpError::BufferTooSmall {
            needed: 12,
            actual: 11
        })
    ));
    assert!(matches!(
        DirectImage::new(1, 1, PixelLayout::Index8, vec![0]),
        Err(BmpError::LayoutMismatch { .. })
    ));
    assert!(matches!(
        IndexedImage::new(2, 1, vec![0, 3], palette(3)),
        Err(BmpError::PaletteIndexOutOfRange {
            index: 3,
            palette_len: 3,
            x: 1,
            y: 0
        })
    ));
}

#[test]
fn limits_reject_large() {
    let encoded = encode_bmp(&direct(1, 2, PixelLayout::Rgb8, vec![255; 6]), 24).unwrap();

    let limits = Limits {
        max_pixels: Some(1), // only 1 pixel allowed
        ..Default::default()
    };

    let result = DecodeRequest::new(&encoded).with_limits(&limits).decode();
    match result {
        Err(BmpError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[cfg(feature = "rgb")]
#[test]
fn typed_pixel_access() {
    use rgb::{RGB8, RGBA8};

    let src = direct(2, 1, PixelLayout::Rgb8, vec![1, 2, 3, 4, 5, 6]);
    let decoded = decode_bmp(&encode_bmp(&src, 24).unwrap()).unwrap();
    let img = decoded.pixels().as_direct().unwrap();
    let px: &[RGB8] = img.as_pixels().unwrap();
    assert_eq!(px, &[RGB8::new(1, 2, 3), RGB8::new(4, 5, 6)]);
    assert!(img.as_pixels::<RGBA8>().is_err());
}

#[cfg(feature = "imgref")]
#[test]
fn imgref_view() {
    use rgb::RGBA8;

    let pixels = noise(3 * 2 * 4, 5);
    let src = direct(3, 2, PixelLayout::Rgba8, pixels);
    let decoded = decode_bmp(&encode_bmp(&src, 32).unwrap()).unwrap();
    let img = decoded.pixels().as_direct().unwrap().as_imgref::<RGBA8>().unwrap();
    assert_eq!(img.width(), 3);
    assert_eq!(img.height(), 2);
    assert_eq!(img.stride(), 3);
}
