//! Format decoders module
//!
//! One decoder per supported container. Dispatch is a `match` over the closed
//! [`FormatTag`] set; adding a format means adding a decoder here and a
//! signature in the sniffer.

mod bmp;
mod gif;
mod jpeg;
mod png;
mod tiff;

pub use self::bmp::BmpDecoder;
pub use self::gif::GifDecoder;
pub use self::jpeg::JpegDecoder;
pub use self::png::PngDecoder;
pub use self::tiff::TiffDecoder;

use crate::image_pipeline::common::{DecodeError, Limits};
use crate::image_pipeline::raw::{RasterDecoder, RawImage};
use crate::image_pipeline::sniff::FormatTag;

/// Decodes `data` with the decoder selected by `format`.
pub fn decode(format: FormatTag, data: &[u8], limits: Limits) -> Result<RawImage, DecodeError> {
    match format {
        FormatTag::Png => PngDecoder::new(limits).decode(data),
        FormatTag::Jpeg => JpegDecoder::new(limits).decode(data),
        FormatTag::Gif => GifDecoder::new(limits).decode(data),
        FormatTag::Bmp => BmpDecoder::new(limits).decode(data),
        FormatTag::Tiff => TiffDecoder::new(limits).decode(data),
    }
}
