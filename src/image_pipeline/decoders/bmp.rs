//! BMP decoding via the `image` crate's BMP codec.
//!
//! The codec handles every DIB header revision, palettes, RLE and bitfields,
//! and always hands back top-down 8-bit RGB or RGBA.

use std::io::Cursor;

use image::{ColorType, ImageDecoder};
use tracing::debug;

use crate::image_pipeline::common::{DecodeError, Limits};
use crate::image_pipeline::raw::{ChannelLayout, RasterDecoder, RawImage, RowOrder};

pub struct BmpDecoder {
    limits: Limits,
}

impl BmpDecoder {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

fn layout_for(color_type: ColorType) -> Result<ChannelLayout, DecodeError> {
    match color_type {
        ColorType::L8 => Ok(ChannelLayout::Gray),
        ColorType::Rgb8 => Ok(ChannelLayout::Rgb),
        ColorType::Rgba8 => Ok(ChannelLayout::Rgba),
        other => Err(DecodeError::unsupported(format!("BMP color type {:?}", other))),
    }
}

impl RasterDecoder for BmpDecoder {
    fn decode(&self, data: &[u8]) -> Result<RawImage, DecodeError> {
        let decoder = image::codecs::bmp::BmpDecoder::new(Cursor::new(data))?;
        let (width, height) = decoder.dimensions();
        let color_type = decoder.color_type();
        debug!("BMP header: {}x{} {:?}", width, height, color_type);
        self.limits.check(width.into(), height.into())?;

        let layout = layout_for(color_type)?;
        let len = usize::try_from(decoder.total_bytes())
            .map_err(|_| DecodeError::unsupported("BMP raster exceeds addressable memory"))?;
        let mut pixels = vec![0u8; len];
        decoder.read_image(&mut pixels)?;

        RawImage::new(width, height, layout, 8, RowOrder::TopDown, pixels)
    }
}
