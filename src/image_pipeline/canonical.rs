//! Canonicalization module
//!
//! Reduces any decoded raster to RGBA, 8 bits per channel, rows top to bottom.

mod canonicalizer;
pub(crate) mod color;
pub mod types;

pub use canonicalizer::{CanonicalSink, Canonicalizer};
pub use types::CanonicalBuffer;
