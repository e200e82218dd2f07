use tracing::debug;

use crate::image_pipeline::common::error::ProjectionError;
use crate::image_pipeline::projection::sums::ProjectionSums;

/// Accumulates projection sums over a batch of same-sized images.
///
/// Grand totals are off until [`track_grand_totals`](Self::track_grand_totals)
/// turns them on. Once a background is set, every later image has it
/// subtracted before it is returned or added to the totals.
#[derive(Debug, Clone)]
pub struct ProjectionBatch {
    width: u32,
    height: u32,
    grand_totals: Option<ProjectionSums>,
    background: Option<ProjectionSums>,
    image_count: u64,
}

impl ProjectionBatch {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            grand_totals: None,
            background: None,
            image_count: 0,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Starts or stops grand totals. Either way existing totals are discarded
    /// and the image count restarts.
    pub fn track_grand_totals(&mut self, on: bool) {
        self.grand_totals = on.then(|| ProjectionSums::zeroed(self.width, self.height));
        self.image_count = 0;
    }

    /// Subtracts the background, if any, and folds the result into the totals.
    pub fn add(&mut self, mut sums: ProjectionSums) -> Result<ProjectionSums, ProjectionError> {
        if (sums.width(), sums.height()) != (self.width, self.height) {
            return Err(ProjectionError::DimensionMismatch {
                width: self.width,
                height: self.height,
                found_width: sums.width(),
                found_height: sums.height(),
            });
        }
        if let Some(background) = &self.background {
            sums.subtract(background);
        }
        if let Some(totals) = &mut self.grand_totals {
            totals.accumulate(&sums);
        }
        self.image_count += 1;
        Ok(sums)
    }

    /// Sets the background to the mean of the images added since totals started.
    pub fn set_background(&mut self) -> Result<(), ProjectionError> {
        let totals = match &self.grand_totals {
            Some(totals) if self.image_count > 0 => totals,
            _ => return Err(ProjectionError::NoGrandTotals),
        };
        debug!("Background from {} images", self.image_count);
        self.background = Some(totals.divided_by(self.image_count));
        Ok(())
    }

    pub fn clear_background(&mut self) {
        self.background = None;
    }

    pub fn background(&self) -> Option<&ProjectionSums> {
        self.background.as_ref()
    }

    pub fn grand_totals(&self) -> Option<&ProjectionSums> {
        self.grand_totals.as_ref()
    }

    pub fn image_count(&self) -> u64 {
        self.image_count
    }
}
