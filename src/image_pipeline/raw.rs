//! Decoded raster module
//!
//! This module defines the format-neutral raster every decoder produces, and the
//! decoder trait the format implementations share.

pub(crate) mod samples;
mod reader;
pub mod types;

pub use reader::RasterDecoder;
pub use types::{ChannelLayout, RawImage, RowOrder};
