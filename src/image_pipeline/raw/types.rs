//! Decoded raster types

use crate::image_pipeline::common::error::DecodeError;

/// Color model and channel order of a decoded raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Gray,
    GrayAlpha,
    Rgb,
    Rgba,
    /// Subtractive CMYK where 0 means no ink
    Cmyk,
}

impl ChannelLayout {
    pub fn channels(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::GrayAlpha => 2,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba | ChannelLayout::Cmyk => 4,
        }
    }
}

/// Storage order of the raster rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    #[default]
    TopDown,
    BottomUp,
}

/// Raster produced by a format decoder.
///
/// Samples are row-major without padding. Depths below 8 bits hold one
/// sample per byte; 16-bit samples are big-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImage {
    width: u32,
    height: u32,
    layout: ChannelLayout,
    bit_depth: u8,
    row_order: RowOrder,
    pixel_data: Vec<u8>,
}

impl RawImage {
    /// Builds a raster after checking the sample buffer against its geometry.
    pub fn new(
        width: u32,
        height: u32,
        layout: ChannelLayout,
        bit_depth: u8,
        row_order: RowOrder,
        pixel_data: Vec<u8>,
    ) -> Result<Self, DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions(width.into(), height.into()));
        }
        if !matches!(bit_depth, 1 | 2 | 4 | 8 | 16) {
            return Err(DecodeError::unsupported(format!("bit depth {}", bit_depth)));
        }

        let bytes_per_sample = usize::from(bit_depth).div_ceil(8);
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(layout.channels() * bytes_per_sample))
            .ok_or(DecodeError::InvalidDimensions(width.into(), height.into()))?;
        if pixel_data.len() != expected {
            return Err(DecodeError::malformed(format!(
                "pixel buffer holds {} bytes, expected {}",
                pixel_data.len(),
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            layout,
            bit_depth,
            row_order,
            pixel_data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn layout(&self) -> ChannelLayout {
        self.layout
    }

    pub fn channels(&self) -> usize {
        self.layout.channels()
    }

    pub fn bit_depth(&self) -> u8 {
        self.bit_depth
    }

    pub fn row_order(&self) -> RowOrder {
        self.row_order
    }

    pub fn pixel_data(&self) -> &[u8] {
        &self.pixel_data
    }

    pub fn bytes_per_sample(&self) -> usize {
        usize::from(self.bit_depth).div_ceil(8)
    }

    /// Length in bytes of one stored row.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.channels() * self.bytes_per_sample()
    }

    /// Stored row `index`, counted in storage order.
    pub fn row(&self, index: usize) -> &[u8] {
        let len = self.row_len();
        &self.pixel_data[index * len..(index + 1) * len]
    }
}
