//! Watermark module for labeling images with their file name.
//!
//! Every processed image gets a rounded, semi-transparent plate overlaid
//! near the bottom, carrying the file's base name in bold black text, and
//! is re-encoded as a progressive JPEG.
//!
//! # Features
//!
//! - **Deterministic geometry**: label size derives from the image extent
//! - **EXIF auto-orientation** before the label is placed
//! - **Clipped compositing**: oversized labels never write outside bounds
//! - **Embedded font**: no external font dependencies
//!
//! # Example
//!
//! ```ignore
//! use nameplate::watermark::composite;
//!
//! let labeled_jpeg = composite(&bytes, "beach-day.png")?;
//! ```

pub mod compositor;
pub mod error;
pub mod geometry;
pub mod label;

// Re-export main types for convenience
pub use compositor::composite;
pub use error::WatermarkError;
pub use geometry::{label_spec, LabelSpec};
pub use label::render_label;
