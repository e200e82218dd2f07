//! Sub-byte sample unpacking.

/// Expands `count` packed MSB-first samples of `bit_depth` bits to one byte each.
pub(crate) fn unpack_samples(packed: &[u8], bit_depth: u8, count: usize, out: &mut Vec<u8>) {
    let bits = usize::from(bit_depth);
    let mask = (1u16 << bit_depth) - 1;
    for i in 0..count {
        let bit_offset = i * bits;
        let byte = packed[bit_offset / 8];
        let shift = 8 - bits - bit_offset % 8;
        out.push(((u16::from(byte) >> shift) & mask) as u8);
    }
}
