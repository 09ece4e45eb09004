#![no_main]
use libfuzzer_sys::fuzz_target;
use zenbmp::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding at the source depth and decoding
    // again must produce identical pixels
    let limits = Limits::default().with_max_memory_bytes(1 << 28);
    let Ok(decoded) = decode_bmp_with_limits(data, &limits) else {
        return;
    };

    let depth = decoded.info_header.bit_depth();
    let reencoded = match encode_bmp(decoded.pixels(), depth) {
        Ok(bytes) => bytes,
        Err(e) => panic!("decoded {depth}-bit image failed to re-encode: {e}"),
    };
    let Ok(decoded2) = decode_bmp(&reencoded) else {
        panic!("re-encoded data failed to decode");
    };

    assert_eq!(decoded.pixels().samples(), decoded2.pixels().samples(), "roundtrip pixel mismatch");
    assert_eq!(decoded.pixels().palette(), decoded2.pixels().palette());
    assert_eq!(decoded.width, decoded2.width);
    assert_eq!(decoded.height, decoded2.height);
});
