//! Label rendering.
//!
//! Renders the label overlay to an RGBA image: a rounded, semi-transparent
//! white plate with the file's base name centered on it in bold black text.
//!
//! # Example
//!
//! ```ignore
//! use nameplate::watermark::label::render_label;
//!
//! let label = render_label("vacation-photo", 2000, 375, 180.0).unwrap();
//! assert_eq!(label.width(), 2000);
//! ```

use super::error::WatermarkError;
use crate::constants::{
    PLATE_CORNER_RATIO, PLATE_HEIGHT_RATIO, PLATE_INSET_X_RATIO, PLATE_INSET_Y_RATIO,
    PLATE_OPACITY, PLATE_WIDTH_RATIO,
};
use ab_glyph::{Font, FontRef, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use std::sync::OnceLock;

static LABEL_FONT: OnceLock<FontRef<'static>> = OnceLock::new();

/// Embedded label font (DejaVu Sans Bold).
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSans-Bold.ttf");

/// Get the label font, initializing it lazily.
fn label_font() -> Result<&'static FontRef<'static>, WatermarkError> {
    LABEL_FONT.get_or_init(|| {
        FontRef::try_from_slice(EMBEDDED_FONT_DATA)
            .expect("Failed to load embedded font - this is a bug")
    });

    LABEL_FONT
        .get()
        .ok_or_else(|| WatermarkError::render_failed("Failed to initialize font"))
}

/// Render the label to a transparent RGBA canvas of the given extent.
///
/// An empty text still renders the plate, matching what a caller gets
/// for a file named only by its extension.
pub fn render_label(
    text: &str,
    box_w: u32,
    box_h: u32,
    font_size: f32,
) -> Result<RgbaImage, WatermarkError> {
    if box_w == 0 || box_h == 0 {
        return Err(WatermarkError::render_failed("label box has zero extent"));
    }

    let mut image = RgbaImage::new(box_w, box_h);
    draw_plate(&mut image);
    if !text.is_empty() {
        draw_centered_text(&mut image, text, font_size)?;
    }

    Ok(image)
}

/// Fill the rounded plate onto a transparent canvas.
fn draw_plate(image: &mut RgbaImage) {
    let w = image.width() as f32;
    let h = image.height() as f32;

    let plate_x = w * PLATE_INSET_X_RATIO;
    let plate_y = h * PLATE_INSET_Y_RATIO;
    let plate_w = w * PLATE_WIDTH_RATIO;
    let plate_h = h * PLATE_HEIGHT_RATIO;
    let radius = h * PLATE_CORNER_RATIO;

    let alpha = (PLATE_OPACITY * 255.0) as u8;
    let fill = Rgba([255, 255, 255, alpha]);

    for y in 0..image.height() {
        for x in 0..image.width() {
            // Sample at the pixel center
            let sx = x as f32 + 0.5;
            let sy = y as f32 + 0.5;
            if inside_rounded_rect(sx, sy, plate_x, plate_y, plate_w, plate_h, radius) {
                image.put_pixel(x, y, fill);
            }
        }
    }
}

/// Point-in-rounded-rect test.
fn inside_rounded_rect(x: f32, y: f32, rx: f32, ry: f32, rw: f32, rh: f32, radius: f32) -> bool {
    if x < rx || y < ry || x >= rx + rw || y >= ry + rh {
        return false;
    }

    let r = radius.min(rw / 2.0).min(rh / 2.0);

    // Outside the corner bands the straight-edge check above suffices
    let cx = if x < rx + r {
        rx + r
    } else if x > rx + rw - r {
        rx + rw - r
    } else {
        return true;
    };
    let cy = if y < ry + r {
        ry + r
    } else if y > ry + rh - r {
        ry + rh - r
    } else {
        return true;
    };

    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= r * r
}

/// Calculate the advance width of a line of text.
fn measure_text(font: &FontRef<'_>, text: &str, font_size: f32) -> f32 {
    let scale = PxScale::from(font_size);
    let scaled_font = font.as_scaled(scale);

    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);

        if let Some(prev) = prev_glyph {
            width += scaled_font.kern(prev, glyph_id);
        }

        width += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width
}

/// Draw black text centered on both axes of the canvas.
///
/// Glyphs are clipped at the canvas edges, so a name longer than the
/// plate renders truncated rather than failing.
fn draw_centered_text(
    image: &mut RgbaImage,
    text: &str,
    font_size: f32,
) -> Result<(), WatermarkError> {
    let font = label_font()?;
    let scale = PxScale::from(font_size);
    let scaled_font = font.as_scaled(scale);

    let canvas_w = image.width() as f32;
    let canvas_h = image.height() as f32;

    let text_w = measure_text(font, text, font_size);
    let text_h = scaled_font.ascent() - scaled_font.descent();

    let origin_x = (canvas_w - text_w) / 2.0;
    let baseline_y = (canvas_h - text_h) / 2.0 + scaled_font.ascent();

    let mut cursor_x = origin_x;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);

        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, ab_glyph::point(cursor_x, baseline_y));

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
                    let pixel_alpha = (coverage * 255.0) as u8;
                    let pixel = Rgba([0, 0, 0, pixel_alpha]);

                    // Blend with the plate pixel for anti-aliasing
                    let existing = image.get_pixel(x as u32, y as u32);
                    let blended = blend_pixels(*existing, pixel);
                    image.put_pixel(x as u32, y as u32, blended);
                }
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    Ok(())
}

/// Blend two RGBA pixels using alpha compositing.
fn blend_pixels(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let top_alpha = top[3] as f32 / 255.0;
    let bottom_alpha = bottom[3] as f32 / 255.0;

    let out_alpha = top_alpha + bottom_alpha * (1.0 - top_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |t: u8, b: u8| -> u8 {
        let t = t as f32 / 255.0;
        let b = b as f32 / 255.0;
        let result = (t * top_alpha + b * bottom_alpha * (1.0 - top_alpha)) / out_alpha;
        (result * 255.0) as u8
    };

    Rgba([
        blend(top[0], bottom[0]),
        blend(top[1], bottom[1]),
        blend(top[2], bottom[2]),
        (out_alpha * 255.0) as u8,
    ])
}
