//! Watermark error types.
//!
//! Defines errors that can occur while labeling an image.

use std::fmt;

/// Errors that can occur during watermark processing.
#[derive(Debug, Clone)]
pub enum WatermarkError {
    /// Failed to decode the source image
    DecodeError(String),

    /// Decoded image has an unusable extent
    InvalidDimensions { width: u32, height: u32 },

    /// Failed to render the label
    RenderError(String),

    /// Failed to encode the labeled image as JPEG
    EncodeError(String),
}

impl fmt::Display for WatermarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DecodeError(msg) => write!(f, "Failed to decode image: {}", msg),
            Self::InvalidDimensions { width, height } => {
                write!(f, "Invalid image dimensions {}x{}", width, height)
            }
            Self::RenderError(msg) => write!(f, "Failed to render label: {}", msg),
            Self::EncodeError(msg) => write!(f, "Failed to encode image: {}", msg),
        }
    }
}

impl std::error::Error for WatermarkError {}

impl WatermarkError {
    /// Maps watermark errors to HTTP status codes
    ///
    /// Status mapping:
    /// - DecodeError, InvalidDimensions → 400 (Bad Request)
    /// - RenderError, EncodeError → 500 (Internal Server Error)
    pub fn to_http_status(&self) -> u16 {
        match self {
            Self::DecodeError(_) | Self::InvalidDimensions { .. } => 400,
            Self::RenderError(_) | Self::EncodeError(_) => 500,
        }
    }

    pub fn decode_failed(message: impl Into<String>) -> Self {
        Self::DecodeError(message.into())
    }

    pub fn render_failed(message: impl Into<String>) -> Self {
        Self::RenderError(message.into())
    }

    pub fn encode_failed(message: impl Into<String>) -> Self {
        Self::EncodeError(message.into())
    }
}
