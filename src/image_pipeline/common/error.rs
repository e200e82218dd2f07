use thiserror::Error;

use crate::image_pipeline::sniff::FormatTag;

/// Failure inside a single format decoder.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated data: {0}")]
    Truncated(String),

    #[error("Malformed data: {0}")]
    Malformed(String),

    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(u64, u64),

    #[error("Image dimensions {width}x{height} exceed maximum {max}")]
    TooLarge { width: u64, height: u64, max: u32 },
}

impl DecodeError {
    pub(crate) fn malformed(what: impl Into<String>) -> Self {
        Self::Malformed(what.into())
    }

    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported(what.into())
    }
}

impl From<png::DecodingError> for DecodeError {
    fn from(err: png::DecodingError) -> Self {
        match err {
            png::DecodingError::IoError(e) => Self::Truncated(e.to_string()),
            png::DecodingError::LimitsExceeded => {
                Self::Unsupported("decoded image exceeds the PNG allocation limit".to_string())
            }
            other => Self::Malformed(other.to_string()),
        }
    }
}

impl From<jpeg_decoder::Error> for DecodeError {
    fn from(err: jpeg_decoder::Error) -> Self {
        match err {
            jpeg_decoder::Error::Io(e) => Self::Truncated(e.to_string()),
            jpeg_decoder::Error::Unsupported(feature) => Self::Unsupported(format!("{:?}", feature)),
            other => Self::Malformed(other.to_string()),
        }
    }
}

impl From<tiff::TiffError> for DecodeError {
    fn from(err: tiff::TiffError) -> Self {
        match err {
            tiff::TiffError::IoError(e) => Self::Truncated(e.to_string()),
            tiff::TiffError::UnsupportedError(e) => Self::Unsupported(e.to_string()),
            other => Self::Malformed(other.to_string()),
        }
    }
}

impl From<gif::DecodingError> for DecodeError {
    fn from(err: gif::DecodingError) -> Self {
        match err {
            gif::DecodingError::Io(e) => Self::Truncated(e.to_string()),
            other => Self::Malformed(other.to_string()),
        }
    }
}

impl From<image::ImageError> for DecodeError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => Self::Truncated(e.to_string()),
            image::ImageError::Unsupported(e) => Self::Unsupported(e.to_string()),
            image::ImageError::Limits(e) => Self::Unsupported(e.to_string()),
            other => Self::Malformed(other.to_string()),
        }
    }
}

/// Terminal outcome of a checksum invocation that did not produce a digest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("Empty input")]
    Empty,

    #[error("Unsupported format: no known image signature matched")]
    UnsupportedFormat,

    #[error("Corrupt {format} image: {reason}")]
    Corrupt { format: FormatTag, reason: String },

    #[error("{format} image dimensions {width}x{height} exceed maximum {max}")]
    ImageTooLarge {
        format: FormatTag,
        width: u64,
        height: u64,
        max: u32,
    },
}

impl PipelineError {
    pub(crate) fn from_decode(format: FormatTag, err: DecodeError) -> Self {
        match err {
            DecodeError::TooLarge { width, height, max } => Self::ImageTooLarge {
                format,
                width,
                height,
                max,
            },
            other => Self::Corrupt {
                format,
                reason: other.to_string(),
            },
        }
    }

    /// True when the input was not recognized as an image at all.
    ///
    /// Empty input is a distinguished case of an unsupported format.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Empty | Self::UnsupportedFormat)
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Misuse of a projection batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("Image is {found_width}x{found_height}, batch expects {width}x{height}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        found_width: u32,
        found_height: u32,
    },

    #[error("Background requires grand totals over at least one image")]
    NoGrandTotals,
}
