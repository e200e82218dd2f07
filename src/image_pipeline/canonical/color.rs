//! Sample scaling and color model conversion rules.

/// Linearly rescales a sample of `bit_depth` bits to 8 bits, rounding to nearest.
#[inline]
pub(crate) fn scale_to_u8(value: u16, bit_depth: u8) -> u8 {
    match bit_depth {
        8 => value as u8,
        _ => {
            let max = (1u32 << bit_depth) - 1;
            ((u32::from(value) * 255 + max / 2) / max) as u8
        }
    }
}

/// Converts subtractive CMYK (0 = no ink) to RGB.
#[inline]
pub(crate) fn cmyk_to_rgb(c: u8, m: u8, y: u8, k: u8) -> [u8; 3] {
    let white = 255 - u32::from(k);
    let channel = |ink: u8| (((255 - u32::from(ink)) * white + 127) / 255) as u8;
    [channel(c), channel(m), channel(y)]
}
