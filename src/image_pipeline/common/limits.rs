use crate::image_pipeline::common::error::DecodeError;

/// Dimension limits a decoder enforces before allocating its raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest accepted width or height, `None` for no limit
    pub max_dimension: Option<u32>,
}

impl Limits {
    pub const fn unlimited() -> Self {
        Self { max_dimension: None }
    }

    /// Rejects zero-sized images and images above the configured maximum.
    pub fn check(&self, width: u64, height: u64) -> Result<(), DecodeError> {
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions(width, height));
        }

        if let Some(max) = self.max_dimension {
            if width > u64::from(max) || height > u64::from(max) {
                tracing::warn!("Image dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(DecodeError::TooLarge { width, height, max });
            }
        }

        Ok(())
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_dimension: Some(50_000),
        }
    }
}
