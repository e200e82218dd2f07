//! Format-independent content checksums for raster images.
//!
//! ```no_run
//! let bytes = std::fs::read("photo.png").unwrap();
//! let digest = imgsum::checksum(&bytes).unwrap();
//! println!("{}", digest);
//! ```

pub mod image_pipeline;
pub mod logger;

pub use image_pipeline::{checksum, ChecksumConfig, ChecksumPipeline, Digest, FormatTag, PipelineError};
