//! Image checksum pipeline module
//!
//! This module turns an encoded image into a content-identity digest: the
//! container is sniffed, decoded to a raster, reduced to a canonical RGBA8
//! layout and streamed through the checksum engine.

pub mod canonical;
pub mod checksum;
pub mod common;
pub mod decoders;
pub mod driver;
pub mod projection;
pub mod raw;
pub mod sniff;

#[cfg(test)]
pub(crate) mod test_support;

pub use common::{DecodeError, Limits, PipelineError, ProjectionError, Result};

pub use sniff::FormatTag;

pub use raw::{ChannelLayout, RasterDecoder, RawImage, RowOrder};

pub use canonical::{CanonicalBuffer, CanonicalSink, Canonicalizer};

pub use checksum::{ChecksumEngine, Digest, DigestParseError, DEFAULT_SEED, DIGEST_LEN};

pub use projection::{Axes, ProjectionBatch, ProjectionSums};

pub use driver::{
    checksum,
    ChecksumConfig,
    ChecksumConfigBuilder,
    ChecksumPipeline,
    ChecksumReport,
    PipelineTimings,
};
