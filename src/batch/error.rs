//! Batch error types.
//!
//! A batch fails as a whole: these errors are terminal for the whole
//! submission, carrying the input name that triggered the failure.

use crate::archive::ArchiveError;
use crate::watermark::WatermarkError;
use std::fmt;

/// Errors that abort a batch.
#[derive(Debug)]
pub enum BatchError {
    /// Labeling a loose image failed
    Watermark {
        name: String,
        source: WatermarkError,
    },

    /// An archive input could not be read, or the output could not be packed
    Archive { name: String, source: ArchiveError },

    /// An input's name does not map to a supported kind
    UnsupportedInput { name: String },

    /// The submission contained no inputs
    EmptySubmission,
}

impl fmt::Display for BatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Watermark { name, source } => {
                write!(f, "Failed to process '{}': {}", name, source)
            }
            Self::Archive { name, source } => {
                write!(f, "Archive '{}' failed: {}", name, source)
            }
            Self::UnsupportedInput { name } => {
                write!(f, "Unsupported input file: {}", name)
            }
            Self::EmptySubmission => write!(f, "No files submitted"),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Watermark { source, .. } => Some(source),
            Self::Archive { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl BatchError {
    /// Maps batch errors to HTTP status codes
    ///
    /// Status mapping:
    /// - Watermark, Archive → delegated to the underlying error
    /// - UnsupportedInput → 415 (Unsupported Media Type)
    /// - EmptySubmission → 400 (Bad Request)
    pub fn to_http_status(&self) -> u16 {
        match self {
            Self::Watermark { source, .. } => source.to_http_status(),
            Self::Archive { source, .. } => source.to_http_status(),
            Self::UnsupportedInput { .. } => 415,
            Self::EmptySubmission => 400,
        }
    }

    pub fn unsupported(name: impl Into<String>) -> Self {
        Self::UnsupportedInput { name: name.into() }
    }
}
