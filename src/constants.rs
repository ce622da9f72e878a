// Constants module - centralized values for the watermarking pipeline
//
// This module defines the fixed numbers used throughout the codebase.
// Using constants instead of magic numbers improves maintainability
// and makes it easier to understand and modify defaults.

// =============================================================================
// Submission limits
// =============================================================================

/// Maximum combined size of a submission (100 MB)
pub const MAX_SUBMISSION_BYTES: usize = 100 * 1024 * 1024;

/// File name used when multiple inputs are bundled into one archive
pub const BUNDLE_FILE_NAME: &str = "processed_images.zip";

/// Extensions accepted as image inputs (matched case-insensitively)
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

// =============================================================================
// Encoding
// =============================================================================

/// JPEG quality for re-encoded output
pub const JPEG_QUALITY: u8 = 85;

/// Deflate level for packed archives
pub const ZIP_COMPRESSION_LEVEL: i64 = 6;

// =============================================================================
// Label geometry
// =============================================================================
// The label box is sized against a 4000px reference width. Its width tracks
// the image width but is clamped to a fixed range, so small images get a
// label that overflows and is clipped at composite time.

/// Label width as a fraction of the image width
pub const LABEL_WIDTH_RATIO: f32 = 0.95;

/// Minimum label box width in pixels
pub const LABEL_MIN_WIDTH: f32 = 2000.0;

/// Maximum label box width in pixels
pub const LABEL_MAX_WIDTH: f32 = 4000.0;

/// Width the label proportions are defined against
pub const LABEL_REFERENCE_WIDTH: f32 = 4000.0;

/// Label box height at the reference width
pub const LABEL_REFERENCE_HEIGHT: f32 = 750.0;

/// Font size at the reference width
pub const LABEL_REFERENCE_FONT_SIZE: f32 = 360.0;

/// Preferred vertical placement as a fraction of the image height
pub const LABEL_VERTICAL_RATIO: f32 = 0.7;

/// Minimum gap kept below the label as a fraction of the image height
pub const LABEL_BOTTOM_MARGIN_RATIO: f32 = 0.1;

// =============================================================================
// Label plate styling
// =============================================================================

/// Plate opacity (white fill over the image)
pub const PLATE_OPACITY: f32 = 0.85;

/// Horizontal plate inset as a fraction of the label box width
pub const PLATE_INSET_X_RATIO: f32 = 0.0125;

/// Vertical plate inset as a fraction of the label box height
pub const PLATE_INSET_Y_RATIO: f32 = 0.0667;

/// Plate width as a fraction of the label box width
pub const PLATE_WIDTH_RATIO: f32 = 0.975;

/// Plate height as a fraction of the label box height
pub const PLATE_HEIGHT_RATIO: f32 = 0.867;

/// Plate corner radius as a fraction of the label box height
pub const PLATE_CORNER_RATIO: f32 = 0.1;
