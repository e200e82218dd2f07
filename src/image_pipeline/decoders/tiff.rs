//! TIFF decoding via the `tiff` crate.
//!
//! Only the first page is read. Palette (`RGBPalette`) images are rejected by
//! the crate and surface as unsupported.

use std::io::Cursor;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::ColorType;
use tracing::debug;

use crate::image_pipeline::common::{DecodeError, Limits};
use crate::image_pipeline::raw::{ChannelLayout, RasterDecoder, RawImage, RowOrder};

pub struct TiffDecoder {
    limits: Limits,
}

impl TiffDecoder {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }
}

fn sample_layout(color_type: ColorType) -> Result<(ChannelLayout, u8), DecodeError> {
    let (layout, depth) = match color_type {
        ColorType::Gray(depth) => (ChannelLayout::Gray, depth),
        ColorType::GrayA(depth) => (ChannelLayout::GrayAlpha, depth),
        // Gray with one extra sample is reported as a generic band set.
        ColorType::Multiband { bit_depth, num_samples: 2 } => (ChannelLayout::GrayAlpha, bit_depth),
        ColorType::RGB(depth) => (ChannelLayout::Rgb, depth),
        ColorType::RGBA(depth) => (ChannelLayout::Rgba, depth),
        ColorType::CMYK(depth) => (ChannelLayout::Cmyk, depth),
        other => return Err(DecodeError::unsupported(format!("TIFF color type {:?}", other))),
    };
    if !matches!(depth, 8 | 16) {
        return Err(DecodeError::unsupported(format!("TIFF {}-bit samples", depth)));
    }
    Ok((layout, depth))
}

fn to_big_endian(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_be_bytes()).collect()
}

impl RasterDecoder for TiffDecoder {
    fn decode(&self, data: &[u8]) -> Result<RawImage, DecodeError> {
        let mut decoder = Decoder::new(Cursor::new(data))?;
        let (width, height) = decoder.dimensions()?;
        let color_type = decoder.colortype()?;
        debug!("TIFF header: {}x{} {:?}", width, height, color_type);
        self.limits.check(width.into(), height.into())?;

        let (layout, depth) = sample_layout(color_type)?;
        let pixels = match (decoder.read_image()?, depth) {
            (DecodingResult::U8(samples), 8) => samples,
            (DecodingResult::U16(samples), 16) => to_big_endian(&samples),
            _ => return Err(DecodeError::unsupported("TIFF sample format other than unsigned integer")),
        };

        RawImage::new(width, height, layout, depth, RowOrder::TopDown, pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_pipeline::test_support::{encode_tiff, encode_tiff_gray_alpha, encode_tiff_palette};
    use ::tiff::encoder::colortype;

    fn decode(bytes: &[u8]) -> Result<RawImage, DecodeError> {
        TiffDecoder::new(Limits::default()).decode(bytes)
    }

    #[test]
    fn test_decodes_rgb8() {
        let pixels = [1, 2, 3, 4, 5, 6];
        let image = decode(&encode_tiff::<colortype::RGB8>(2, 1, &pixels)).unwrap();
        assert_eq!(image.layout(), ChannelLayout::Rgb);
        assert_eq!(image.pixel_data(), &pixels);
    }

    #[test]
    fn test_sixteen_bit_samples_become_big_endian() {
        let image = decode(&encode_tiff::<colortype::Gray16>(2, 1, &[0x0102, 0xA0B0])).unwrap();
        assert_eq!(image.bit_depth(), 16);
        assert_eq!(image.pixel_data(), &[0x01, 0x02, 0xA0, 0xB0]);
    }

    #[test]
    fn test_cmyk_layout_is_kept() {
        let image = decode(&encode_tiff::<colortype::CMYK8>(1, 1, &[0, 255, 255, 0])).unwrap();
        assert_eq!(image.layout(), ChannelLayout::Cmyk);
    }

    #[test]
    fn test_gray_with_extra_sample_is_gray_alpha() {
        let image = decode(&encode_tiff_gray_alpha(2, 1, &[10, 255, 20, 0])).unwrap();
        assert_eq!(image.layout(), ChannelLayout::GrayAlpha);
        assert_eq!(image.pixel_data(), &[10, 255, 20, 0]);
    }

    #[test]
    fn test_other_band_counts_are_unsupported() {
        let three = ColorType::Multiband { bit_depth: 8, num_samples: 3 };
        assert!(matches!(sample_layout(three), Err(DecodeError::Unsupported(_))));
        assert!(matches!(sample_layout(ColorType::Palette(8)), Err(DecodeError::Unsupported(_))));
    }

    #[test]
    fn test_palette_image_is_rejected() {
        assert!(decode(&encode_tiff_palette(2, 2, &[0, 1, 1, 0])).is_err());
    }

    #[test]
    fn test_truncated_file_fails() {
        let bytes = encode_tiff::<colortype::RGB8>(16, 16, &[200; 768]);
        assert!(decode(&bytes[..bytes.len() / 2]).is_err());
    }
}
