//! Archive error types.

use std::fmt;

/// Errors that can occur while reading or writing ZIP archives.
#[derive(Debug, Clone)]
pub enum ArchiveError {
    /// Archive structure could not be parsed
    DecodeError(String),

    /// Failed to write the output archive
    EncodeError(String),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeError(msg) => write!(f, "Failed to read archive: {}", msg),
            Self::EncodeError(msg) => write!(f, "Failed to write archive: {}", msg),
        }
    }
}

impl std::error::Error for ArchiveError {}

impl ArchiveError {
    /// Maps archive errors to HTTP status codes
    ///
    /// Status mapping:
    /// - DecodeError → 400 (Bad Request)
    /// - EncodeError → 500 (Internal Server Error)
    pub fn to_http_status(&self) -> u16 {
        match self {
            Self::DecodeError(_) => 400,
            Self::EncodeError(_) => 500,
        }
    }

    pub fn decode_failed(message: impl Into<String>) -> Self {
        Self::DecodeError(message.into())
    }

    pub fn encode_failed(message: impl Into<String>) -> Self {
        Self::EncodeError(message.into())
    }
}
