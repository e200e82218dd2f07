//! Checksum configuration types

use crate::image_pipeline::checksum::DEFAULT_SEED;
use crate::image_pipeline::common::Limits;

/// Configuration for a [`ChecksumPipeline`](super::ChecksumPipeline)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumConfig {
    /// Hash seed. Digests computed under different seeds are unrelated.
    pub seed: u64,
    /// Whether to enforce `max_dimension` while decoding
    pub validate_dimensions: bool,
    /// Largest accepted width or height
    pub max_dimension: Option<u32>,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            validate_dimensions: true,
            max_dimension: Limits::default().max_dimension,
        }
    }
}

impl ChecksumConfig {
    pub fn builder() -> ChecksumConfigBuilder {
        ChecksumConfigBuilder::default()
    }

    /// Decode limits implied by this configuration.
    pub fn limits(&self) -> Limits {
        if self.validate_dimensions {
            Limits {
                max_dimension: self.max_dimension,
            }
        } else {
            Limits::unlimited()
        }
    }
}

/// Builder for ChecksumConfig
#[derive(Default)]
pub struct ChecksumConfigBuilder {
    seed: Option<u64>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl ChecksumConfigBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> ChecksumConfig {
        let default = ChecksumConfig::default();
        ChecksumConfig {
            seed: self.seed.unwrap_or(default.seed),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
