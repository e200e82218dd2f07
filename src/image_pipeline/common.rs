//! Common utilities module
//!
//! This module contains the error types and decode limits shared across the image pipeline.

pub mod error;
pub mod limits;

pub use error::{DecodeError, PipelineError, ProjectionError, Result};
pub use limits::Limits;
