//! Submission surface: the collaborator-facing edge of a batch.
//!
//! Owns the size ceiling, the mapping from a batch result to a
//! downloadable response, and the serialized error payload.

pub mod error;
pub mod response;

pub use error::{ErrorPayload, SubmissionError};
pub use response::{check_submission_size, content_disposition, SubmissionResponse};
