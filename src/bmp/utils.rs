//! Scanline arithmetic and sub-byte index unpacking.

/// Bytes per stored scanline: `width * bits_per_pixel` rounded up to a
/// multiple of 32 bits. Returns `None` on overflow.
///
/// ```
/// // 8-bit, width 5: 5 data bytes + 3 padding.
/// assert_eq!(zenbmp::bytes_per_line(5, 8), Some(8));
/// // 1-bit, width 33: 33 bits round up to 64.
/// assert_eq!(zenbmp::bytes_per_line(33, 1), Some(8));
/// ```
pub fn bytes_per_line(width: u32, bits_per_pixel: u16) -> Option<usize> {
    let bits = (width as usize).checked_mul(usize::from(bits_per_pixel))?;
    Some(bits.checked_add(31)? / 32 * 4)
}

/// Bytes of a scanline that carry pixel data, before padding.
pub(crate) fn data_bytes_per_line(width: u32, bits_per_pixel: u16) -> Option<usize> {
    let bits = (width as usize).checked_mul(usize::from(bits_per_pixel))?;
    Some(bits.div_ceil(8))
}

/// Unpack 1-, 4- or 8-bit palette indices from `input` into one byte per
/// pixel. Leftmost pixels live in the most significant bits. `out.len()`
/// is the number of pixels; trailing bits of `input` are ignored.
pub(crate) fn unpack_indices(depth: u16, input: &[u8], out: &mut [u8]) {
    match depth {
        1 => {
            let mut in_iter = input.iter();
            let mut out_iter = out.chunks_exact_mut(8);

            (&mut out_iter)
                .zip(&mut in_iter)
                .for_each(|(out_vals, &in_val)| {
                    for (bit, o) in out_vals.iter_mut().enumerate() {
                        *o = (in_val >> (7 - bit)) & 0x01;
                    }
                });

            if let Some(&in_val) = in_iter.next() {
                for (bit, o) in out_iter.into_remainder().iter_mut().enumerate() {
                    *o = (in_val >> (7 - bit)) & 0x01;
                }
            }
        }
        4 => {
            let mut in_iter = input.iter();
            let mut out_iter = out.chunks_exact_mut(2);

            (&mut out_iter)
                .zip(&mut in_iter)
                .for_each(|(out_vals, &in_val)| {
                    out_vals[0] = in_val >> 4;
                    out_vals[1] = in_val & 0x0f;
                });

            if let Some(&in_val) = in_iter.next() {
                if let Some(o) = out_iter.into_remainder().first_mut() {
                    *o = in_val >> 4;
                }
            }
        }
        8 => {
            let n = out.len().min(input.len());
            out[..n].copy_from_slice(&input[..n]);
        }
        _ => {}
    }
}

/// Inverse of [`unpack_indices`]: pack one-byte indices into `depth`-bit
/// fields, high bits first. `out` must hold `data_bytes_per_line` bytes.
pub(crate) fn pack_indices(depth: u16, input: &[u8], out: &mut [u8]) {
    match depth {
        1 => {
            for (o, chunk) in out.iter_mut().zip(input.chunks(8)) {
                *o = chunk
                    .iter()
                    .enumerate()
                    .fold(0u8, |acc, (bit, &v)| acc | ((v & 0x01) << (7 - bit)));
            }
        }
        4 => {
            for (o, chunk) in out.iter_mut().zip(input.chunks(2)) {
                let hi = chunk[0] & 0x0f;
                let lo = chunk.get(1).map_or(0, |v| v & 0x0f);
                *o = (hi << 4) | lo;
            }
        }
        8 => {
            let n = out.len().min(input.len());
            out[..n].copy_from_slice(&input[..n]);
        }
        _ => {}
    }
}
