//! JPEG decoding via `jpeg-decoder`.

use jpeg_decoder::PixelFormat;
use tracing::debug;

use crate::image_pipeline::common::{DecodeError, Limits};
use crate::image_pipeline::raw::{ChannelLayout, RasterDecoder, RawImage, RowOrder};

pub struct JpegDecoder {
    limits: Limits,
}

impl JpegDecoder {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

impl RasterDecoder for JpegDecoder {
    fn decode(&self, data: &[u8]) -> Result<RawImage, DecodeError> {
        let mut decoder = jpeg_decoder::Decoder::new(data);
        decoder.read_info()?;
        let info = decoder
            .info()
            .ok_or_else(|| DecodeError::malformed("missing frame header"))?;
        debug!(
            "JPEG header: {}x{} {:?} {:?}",
            info.width, info.height, info.pixel_format, info.coding_process
        );
        self.limits.check(info.width.into(), info.height.into())?;

        let pixels = decoder.decode()?;

        // CMYK32 arrives already un-inverted from Adobe's 255 = no ink storage.
        let (layout, bit_depth) = match info.pixel_format {
            PixelFormat::L8 => (ChannelLayout::Gray, 8),
            PixelFormat::L16 => (ChannelLayout::Gray, 16),
            PixelFormat::RGB24 => (ChannelLayout::Rgb, 8),
            PixelFormat::CMYK32 => (ChannelLayout::Cmyk, 8),
        };

        RawImage::new(
            info.width.into(),
            info.height.into(),
            layout,
            bit_depth,
            RowOrder::TopDown,
            pixels,
        )
    }
}
