// rastermill/src/processors/anchor.rs
use image::{DynamicImage, GenericImageView};

use crate::core::{Anchor, Error, Result};

/// Compute the crop box for cropping `size` down to `width` x `height`
/// around the given anchor point.
///
/// The target dimensions are clamped to the image size. The center point
/// and half-extents are truncated to whole pixels; `x2`/`y2` are derived
/// from `x1`/`y1` plus the target size rather than rounded independently,
/// so the box is always exactly `width` x `height` after clamping.
pub fn crop_box(size: (u32, u32), width: u32, height: u32, anchor: Anchor) -> (u32, u32, u32, u32) {
    let (image_width, image_height) = size;
    let width = width.min(image_width);
    let height = height.min(image_height);

    let center_x = (image_width as f64 * 0.5).trunc();
    let center_y = (image_height as f64 * 0.5).trunc();
    let half_width = width as f64 * 0.5;
    let half_height = height as f64 * 0.5;

    let (x1, y1) = match anchor {
        Anchor::Center => ((center_x - half_width).trunc(), (center_y - half_height).trunc()),
        Anchor::Top => ((center_x - half_width).trunc(), 0.0),
        Anchor::Left => (0.0, (center_y - half_height).trunc()),
        Anchor::Right => ((image_width - width) as f64, (center_y - half_height).trunc()),
        Anchor::Bottom => ((center_x - half_width).trunc(), (image_height - height) as f64),
    };

    let x1 = x1 as u32;
    let y1 = y1 as u32;

    (x1, y1, x1 + width, y1 + height)
}

/// Crop an image to an absolute `(x1, y1, x2, y2)` box.
///
/// This is the crop primitive every operator goes through. Empty, inverted
/// or out-of-bounds boxes are rejected with `InvalidGeometry` instead of
/// being clamped; callers that can produce degenerate boxes (percentage
/// crops, post-rotation crops at extreme angles) rely on that.
pub fn crop_to_box(image: &DynamicImage, crop: (i64, i64, i64, i64)) -> Result<DynamicImage> {
    let (x1, y1, x2, y2) = crop;
    let (image_width, image_height) = (image.width() as i64, image.height() as i64);

    if x1 >= x2 || y1 >= y2 {
        return Err(Error::InvalidGeometry(format!(
            "crop box ({}, {}, {}, {}) is empty",
            x1, y1, x2, y2
        )));
    }
    if x1 < 0 || y1 < 0 || x2 > image_width || y2 > image_height {
        return Err(Error::InvalidGeometry(format!(
            "crop box ({}, {}, {}, {}) exceeds the {}x{} image",
            x1, y1, x2, y2, image_width, image_height
        )));
    }

    Ok(image.crop_imm(x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32))
}
