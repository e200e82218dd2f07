//! Pipeline driver module
//!
//! Orchestrates detect, decode, canonicalize and hash behind one entry point.

mod config;
mod pipeline;
mod timing;


pub use config::{ChecksumConfig, ChecksumConfigBuilder};
pub use pipeline::{checksum, ChecksumPipeline, ChecksumReport};
pub use timing::{PipelineTimings, StepTiming, Timer};
