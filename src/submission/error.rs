//! Submission error types and the serialized error payload.

use serde::Serialize;
use std::fmt;

/// Errors raised before a batch is allowed to start.
#[derive(Debug, Clone)]
pub enum SubmissionError {
    /// Combined input size exceeds the ceiling
    TooLarge { size: usize, max_size: usize },
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLarge { size, max_size } => {
                write!(
                    f,
                    "Submission size {} bytes exceeds maximum {} bytes",
                    size, max_size
                )
            }
        }
    }
}

impl std::error::Error for SubmissionError {}

impl SubmissionError {
    /// Maps submission errors to HTTP status codes
    ///
    /// Status mapping:
    /// - TooLarge → 413 (Payload Too Large)
    pub fn to_http_status(&self) -> u16 {
        match self {
            Self::TooLarge { .. } => 413,
        }
    }
}

/// JSON error body handed back to the caller.
///
/// The trace field carries the error chain in debug builds only;
/// release builds expose just the top-level message.
#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorPayload {
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        let stack = if cfg!(debug_assertions) {
            Some(error_chain(err))
        } else {
            None
        };

        Self {
            error: err.to_string(),
            stack,
        }
    }
}

/// Render an error and its sources as one multi-line string.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut chain = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        chain.push_str("\ncaused by: ");
        chain.push_str(&source.to_string());
        current = source.source();
    }
    chain
}
