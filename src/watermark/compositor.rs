//! Watermark compositor: the image labeling pipeline.
//!
//! Takes raw image bytes plus the submitted file name and produces a
//! labeled JPEG: decode → EXIF auto-orient → render label → alpha blend
//! → progressive JPEG encode.
//!
//! # Example
//!
//! ```ignore
//! use nameplate::watermark::composite;
//!
//! let jpeg = composite(&photo_bytes, "sunset.png").unwrap();
//! assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
//! ```

use super::error::WatermarkError;
use super::geometry::label_spec;
use super::label::render_label;
use crate::constants::JPEG_QUALITY;
use image::io::Reader as ImageReader;
use image::{DynamicImage, Rgba, RgbaImage};
use jpeg_encoder::{ColorType, Encoder};
use std::io::Cursor;

/// Overlay the file-name label onto an image and re-encode it as JPEG.
///
/// The output keeps the post-orientation pixel extent of the input.
/// Input bytes are never mutated.
pub fn composite(image_bytes: &[u8], filename: &str) -> Result<Vec<u8>, WatermarkError> {
    let decoded = decode_image(image_bytes)?;
    let oriented = orient(decoded, read_orientation(image_bytes));

    let width = oriented.width();
    let height = oriented.height();
    if width == 0 || height == 0 {
        return Err(WatermarkError::InvalidDimensions { width, height });
    }

    let spec = label_spec(width, height);
    let label = render_label(base_name(filename), spec.box_w, spec.box_h, spec.font_size)?;

    let mut canvas = oriented.to_rgba8();
    blend_label(&mut canvas, &label, spec.x, spec.y);

    encode_jpeg(&canvas)
}

/// Decode image data into a DynamicImage.
fn decode_image(data: &[u8]) -> Result<DynamicImage, WatermarkError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| WatermarkError::decode_failed(e.to_string()))?
        .decode()
        .map_err(|e| WatermarkError::decode_failed(e.to_string()))
}

/// Read the EXIF orientation tag, if any.
fn read_orientation(data: &[u8]) -> Option<u32> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(data))
        .ok()?;
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)?
        .value
        .get_uint(0)
}

/// Apply an EXIF orientation to the decoded image.
fn orient(img: DynamicImage, orientation: Option<u32>) -> DynamicImage {
    match orientation {
        Some(2) => img.fliph(),
        Some(3) => img.rotate180(),
        Some(4) => img.flipv(),
        Some(5) => img.rotate90().fliph(),
        Some(6) => img.rotate90(),
        Some(7) => img.rotate270().fliph(),
        Some(8) => img.rotate270(),
        _ => img,
    }
}

/// Strip the trailing extension from a file name.
///
/// Path separators are respected so an entry like `albums.v2/cover`
/// keeps its directory part intact.
fn base_name(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => stem,
        _ => filename,
    }
}

/// Blend the label onto the target image at the given position.
///
/// The visible region is clamped to the target bounds, so a label wider
/// or taller than the image is clipped rather than wrapped.
fn blend_label(target: &mut RgbaImage, label: &RgbaImage, x: i32, y: i32) {
    let target_width = target.width() as i32;
    let target_height = target.height() as i32;

    let label_width = label.width() as i32;
    let label_height = label.height() as i32;

    let x_start = x.max(0);
    let y_start = y.max(0);
    let x_end = (x + label_width).min(target_width);
    let y_end = (y + label_height).min(target_height);

    for ty in y_start..y_end {
        for tx in x_start..x_end {
            let lx = (tx - x) as u32;
            let ly = (ty - y) as u32;

            let label_pixel = label.get_pixel(lx, ly);
            let target_pixel = target.get_pixel(tx as u32, ty as u32);

            let blended = blend_pixels(*target_pixel, *label_pixel);
            target.put_pixel(tx as u32, ty as u32, blended);
        }
    }
}

/// Blend two pixels using alpha compositing.
///
/// Uses the "over" operator: result = foreground + background * (1 - foreground.alpha)
fn blend_pixels(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg_f = fg as f32 / 255.0;
        let bg_f = bg as f32 / 255.0;
        let result = (fg_f * fg_alpha + bg_f * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0) as u8,
    ])
}

/// Encode an RGBA canvas as a progressive JPEG at the fixed quality.
fn encode_jpeg(canvas: &RgbaImage) -> Result<Vec<u8>, WatermarkError> {
    let width = u16::try_from(canvas.width())
        .map_err(|_| WatermarkError::encode_failed("image width exceeds JPEG limit"))?;
    let height = u16::try_from(canvas.height())
        .map_err(|_| WatermarkError::encode_failed("image height exceeds JPEG limit"))?;

    // JPEG carries no alpha channel
    let mut rgb = Vec::with_capacity(canvas.width() as usize * canvas.height() as usize * 3);
    for pixel in canvas.pixels() {
        rgb.extend_from_slice(&[pixel[0], pixel[1], pixel[2]]);
    }

    let mut out = Vec::new();
    let mut encoder = Encoder::new(&mut out, JPEG_QUALITY);
    encoder.set_progressive(true);
    encoder
        .encode(&rgb, width, height, ColorType::Rgb)
        .map_err(|e| WatermarkError::encode_failed(e.to_string()))?;

    Ok(out)
}
