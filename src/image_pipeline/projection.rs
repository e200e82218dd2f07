//! Projection module
//!
//! Luma sums along each canonical row and column of an image, and batch
//! accumulation of those sums with optional background subtraction.

mod batch;
mod sums;

pub use batch::ProjectionBatch;
pub use sums::{luma, Axes, ProjectionSums};
