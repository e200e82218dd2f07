use crate::image_pipeline::canonical::color::{cmyk_to_rgb, scale_to_u8};
use crate::image_pipeline::canonical::types::{CanonicalBuffer, CANONICAL_CHANNELS};
use crate::image_pipeline::raw::{ChannelLayout, RawImage, RowOrder};

const TRANSPARENT: [u8; CANONICAL_CHANNELS] = [0, 0, 0, 0];

/// Receives canonical rows, top to bottom, one call per row.
pub trait CanonicalSink {
    fn write_row(&mut self, row: &[u8]);
}

impl CanonicalSink for Vec<u8> {
    fn write_row(&mut self, row: &[u8]) {
        self.extend_from_slice(row);
    }
}

/// Discards every row.
impl CanonicalSink for () {
    fn write_row(&mut self, _row: &[u8]) {}
}

impl<S: CanonicalSink + ?Sized> CanonicalSink for &mut S {
    fn write_row(&mut self, row: &[u8]) {
        (**self).write_row(row);
    }
}

/// Feeds each row to both sinks, first `A` then `B`.
impl<A: CanonicalSink, B: CanonicalSink> CanonicalSink for (A, B) {
    fn write_row(&mut self, row: &[u8]) {
        self.0.write_row(row);
        self.1.write_row(row);
    }
}

/// Maps decoded rasters onto the canonical RGBA8 top-down layout.
///
/// Per pixel, in order: samples are rescaled to 8 bits, the color model is
/// mapped to RGBA (gray replicated, missing alpha opaque, CMYK converted), and
/// fully transparent pixels collapse to `[0, 0, 0, 0]`. Rows are emitted top
/// to bottom whatever the storage order.
pub struct Canonicalizer;

impl Canonicalizer {
    /// Materializes the whole canonical buffer.
    pub fn canonicalize(raw: RawImage) -> CanonicalBuffer {
        let mut pixel_data =
            Vec::with_capacity(raw.width() as usize * raw.height() as usize * CANONICAL_CHANNELS);
        Self::stream(&raw, &mut pixel_data);
        CanonicalBuffer {
            width: raw.width(),
            height: raw.height(),
            pixel_data,
        }
    }

    /// Hands canonical rows to `sink` one at a time; only one row is held in memory.
    pub fn stream<S: CanonicalSink + ?Sized>(raw: &RawImage, sink: &mut S) {
        let height = raw.height() as usize;
        let mut row = Vec::with_capacity(raw.width() as usize * CANONICAL_CHANNELS);
        for display_row in 0..height {
            let stored_row = match raw.row_order() {
                RowOrder::TopDown => display_row,
                RowOrder::BottomUp => height - 1 - display_row,
            };
            row.clear();
            canonicalize_row(raw, raw.row(stored_row), &mut row);
            sink.write_row(&row);
        }
    }
}

fn canonicalize_row(raw: &RawImage, source: &[u8], out: &mut Vec<u8>) {
    let bit_depth = raw.bit_depth();
    let bytes_per_sample = raw.bytes_per_sample();
    let channels = raw.channels();
    let layout = raw.layout();

    let mut s = [0u8; CANONICAL_CHANNELS];
    for pixel in source.chunks_exact(channels * bytes_per_sample) {
        for (i, sample) in s.iter_mut().take(channels).enumerate() {
            let value = if bytes_per_sample == 2 {
                u16::from_be_bytes([pixel[2 * i], pixel[2 * i + 1]])
            } else {
                u16::from(pixel[i])
            };
            *sample = scale_to_u8(value, bit_depth);
        }

        let rgba = match layout {
            ChannelLayout::Gray => [s[0], s[0], s[0], 255],
            ChannelLayout::GrayAlpha => [s[0], s[0], s[0], s[1]],
            ChannelLayout::Rgb => [s[0], s[1], s[2], 255],
            ChannelLayout::Rgba => s,
            ChannelLayout::Cmyk => {
                let [r, g, b] = cmyk_to_rgb(s[0], s[1], s[2], s[3]);
                [r, g, b, 255]
            }
        };
        out.extend_from_slice(if rgba[3] == 0 { &TRANSPARENT } else { &rgba });
    }
}
