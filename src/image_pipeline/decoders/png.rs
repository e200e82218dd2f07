//! PNG decoding via the `png` crate.
//!
//! Palette and tRNS transparency are expanded by the crate. Low bit-depth
//! grayscale without transparency is read packed and unpacked here so the raster
//! keeps its true bit depth.

use std::io::Cursor;

use png::{BitDepth, ColorType, Transformations};
use tracing::debug;

use crate::image_pipeline::common::{DecodeError, Limits};
use crate::image_pipeline::raw::samples::unpack_samples;
use crate::image_pipeline::raw::{ChannelLayout, RasterDecoder, RawImage, RowOrder};

pub struct PngDecoder {
    limits: Limits,
}

impl PngDecoder {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

/// True for grayscale rasters the crate would otherwise rescale to 8 bits.
fn keeps_packed_gray(color_type: ColorType, bit_depth: BitDepth, has_trns: bool) -> bool {
    color_type == ColorType::Grayscale && (bit_depth as u8) < 8 && !has_trns
}

impl RasterDecoder for PngDecoder {
    fn decode(&self, data: &[u8]) -> Result<RawImage, DecodeError> {
        // Header pass: tRNS always precedes the first IDAT, so read_info sees it.
        let (width, height, packed_gray) = {
            let reader = png::Decoder::new(Cursor::new(data)).read_info()?;
            let info = reader.info();
            debug!(
                "PNG header: {}x{} {:?} {:?}, tRNS={}",
                info.width,
                info.height,
                info.color_type,
                info.bit_depth,
                info.trns.is_some()
            );
            (
                info.width,
                info.height,
                keeps_packed_gray(info.color_type, info.bit_depth, info.trns.is_some()),
            )
        };
        self.limits.check(width.into(), height.into())?;

        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(if packed_gray {
            Transformations::IDENTITY
        } else {
            Transformations::EXPAND
        });
        let mut reader = decoder.read_info()?;
        let mut buffer = vec![0u8; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buffer)?;
        buffer.truncate(frame.buffer_size());
        // Chunks after the image data still have to reach IEND intact.
        reader.finish()?;

        let layout = match frame.color_type {
            ColorType::Grayscale => ChannelLayout::Gray,
            ColorType::GrayscaleAlpha => ChannelLayout::GrayAlpha,
            ColorType::Rgb => ChannelLayout::Rgb,
            ColorType::Rgba => ChannelLayout::Rgba,
            ColorType::Indexed => {
                return Err(DecodeError::malformed("indexed PNG was not expanded"));
            }
        };
        let bit_depth = frame.bit_depth as u8;

        let pixel_data = if packed_gray {
            let count = frame.width as usize;
            let mut unpacked = Vec::with_capacity(count * frame.height as usize);
            for row in buffer.chunks_exact(frame.line_size) {
                unpack_samples(row, bit_depth, count, &mut unpacked);
            }
            unpacked
        } else {
            buffer
        };

        RawImage::new(
            frame.width,
            frame.height,
            layout,
            bit_depth,
            RowOrder::TopDown,
            pixel_data,
        )
    }
}
