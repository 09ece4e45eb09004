#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header probe and full decode must never panic
    let _ = zenbmp::read_headers(data);

    let limits = zenbmp::Limits::default().with_max_memory_bytes(1 << 28);
    let _ = zenbmp::decode_bmp_with_limits(data, &limits);
});
