//! Label placement geometry.
//!
//! Computes the size and position of the label box for a given image
//! extent. The box width tracks the image width but is clamped to a
//! fixed pixel range, so the box can be wider than a small image; the
//! compositor clips it to the image bounds when blending.

use crate::constants::{
    LABEL_BOTTOM_MARGIN_RATIO, LABEL_MAX_WIDTH, LABEL_MIN_WIDTH, LABEL_REFERENCE_FONT_SIZE,
    LABEL_REFERENCE_HEIGHT, LABEL_REFERENCE_WIDTH, LABEL_VERTICAL_RATIO, LABEL_WIDTH_RATIO,
};

/// Computed size and placement of a label box.
///
/// Coordinates are relative to the image and may be negative when the
/// box overflows the image; blending clips to the visible region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSpec {
    /// Label box width in pixels.
    pub box_w: u32,
    /// Label box height in pixels.
    pub box_h: u32,
    /// Font size in pixels for the label text.
    pub font_size: f32,
    /// Horizontal placement (left edge), floored at zero.
    pub x: i32,
    /// Vertical placement (top edge). May be negative for short images.
    pub y: i32,
}

/// Compute the label spec for an image extent.
///
/// The box is horizontally centered. Vertically it sits at 70% of the
/// image height, pulled up when that would leave less than a 10% margin
/// below the box.
pub fn label_spec(image_w: u32, image_h: u32) -> LabelSpec {
    let w = image_w as f32;
    let h = image_h as f32;

    let box_w = (w * LABEL_WIDTH_RATIO)
        .clamp(LABEL_MIN_WIDTH, LABEL_MAX_WIDTH)
        .round();
    let box_h = (box_w * LABEL_REFERENCE_HEIGHT / LABEL_REFERENCE_WIDTH).round();
    let font_size = box_w * LABEL_REFERENCE_FONT_SIZE / LABEL_REFERENCE_WIDTH;

    let margin_bottom = h * LABEL_BOTTOM_MARGIN_RATIO;
    let y = (h * LABEL_VERTICAL_RATIO).min(h - box_h - margin_bottom);
    let x = ((w - box_w) / 2.0).max(0.0);

    LabelSpec {
        box_w: box_w as u32,
        box_h: box_h as u32,
        font_size,
        x: x.round() as i32,
        y: y.round() as i32,
    }
}
