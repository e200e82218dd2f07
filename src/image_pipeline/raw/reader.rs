use crate::image_pipeline::common::error::DecodeError;
use crate::image_pipeline::raw::types::RawImage;

/// A decoder for one container format.
///
/// Implementations are pure: the same bytes always produce the same raster.
pub trait RasterDecoder {
    fn decode(&self, data: &[u8]) -> Result<RawImage, DecodeError>;
}
