//! Batch module: submission expansion, sequential processing, bundling.
//!
//! A batch maps a set of inputs (loose images and ZIP archives) to one
//! downloadable output, reporting percentage progress as it goes and
//! yielding to the pause gate between units.

pub mod error;
pub mod orchestrator;
pub mod types;

pub use error::BatchError;
pub use orchestrator::run;
pub use types::{BatchResult, ImageInput, InputKind, OutputKind, ProcessedOutput};
