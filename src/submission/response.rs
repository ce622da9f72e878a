//! Mapping batch results onto the download surface.

use super::error::SubmissionError;
use crate::batch::{BatchResult, ImageInput, OutputKind};
use crate::constants::MAX_SUBMISSION_BYTES;
use bytes::Bytes;

/// The single downloadable file a completed submission produces.
#[derive(Debug, Clone)]
pub struct SubmissionResponse {
    /// Suggested download name.
    pub file_name: String,
    /// MIME type of the payload.
    pub content_type: &'static str,
    pub data: Bytes,
}

impl SubmissionResponse {
    pub fn from_batch(result: BatchResult) -> Self {
        let content_type = match result.output.kind {
            OutputKind::Image => "image/jpeg",
            OutputKind::Archive => "application/zip",
        };

        Self {
            file_name: result.output.name,
            content_type,
            data: result.output.bytes,
        }
    }
}

/// Build a Content-Disposition header value with the file name
/// percent-encoded, so non-ASCII names survive the header.
pub fn content_disposition(file_name: &str) -> String {
    format!(
        "attachment; filename=\"{}\"",
        urlencoding::encode(file_name)
    )
}

/// Reject submissions whose combined size exceeds the ceiling.
pub fn check_submission_size(inputs: &[ImageInput]) -> Result<(), SubmissionError> {
    let size: usize = inputs.iter().map(|i| i.bytes.len()).sum();
    if size > MAX_SUBMISSION_BYTES {
        return Err(SubmissionError::TooLarge {
            size,
            max_size: MAX_SUBMISSION_BYTES,
        });
    }
    Ok(())
}
