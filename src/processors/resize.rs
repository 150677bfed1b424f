// rastermill/src/processors/resize.rs
use image::{DynamicImage, GenericImageView};

use super::anchor::{crop_box, crop_to_box};
use crate::core::{Error, FitMode, ResizeAlgorithm, Result};

/// Options for bounding-box resize.
#[derive(Debug, Clone, Default)]
pub struct ResizeOptions {
    /// Bounding box width. `None` means the input width.
    pub width: Option<u32>,
    /// Bounding box height. `None` means the input height.
    pub height: Option<u32>,
    pub fit: FitMode,
    /// Allow enlarging past the native resolution to fill the box.
    pub upscale: bool,
}

/// Compute the size an image gets resampled to for the given bounding box.
///
/// For anchor fit modes the result can exceed the box; the caller crops it
/// back down afterwards. The arithmetic order matters and is part of the
/// dimension contract: optional upscale, shrink-to-fit with truncation at
/// each step, enlarge-for-crop, then a final ceiling.
pub fn scaled_size(
    input: (u32, u32),
    bounds: (u32, u32),
    fit: FitMode,
    upscale: bool,
) -> Result<(u32, u32)> {
    if bounds.0 == 0 || bounds.1 == 0 {
        return Err(Error::InvalidParameter(
            "bounding box dimensions must be positive".to_string(),
        ));
    }

    let (mut width, mut height) = (input.0 as f64, input.1 as f64);
    let (box_width, box_height) = (bounds.0 as f64, bounds.1 as f64);

    // fixed for the whole computation; later steps must not re-derive it
    // from partially scaled dimensions
    let aspect_ratio = width / height;

    if upscale {
        if width < box_width {
            width = box_width;
            height = width / aspect_ratio;
        }
        if height < box_height {
            height = box_height;
            width = height * aspect_ratio;
        }
    }

    // fit into the bounding box
    if width > box_width {
        height = (height * box_width / width).max(1.0).trunc();
        width = box_width.trunc();
    }
    if height > box_height {
        width = (width * box_height / height).max(1.0).trunc();
        height = box_height.trunc();
    }

    // enlarge so an anchor crop can fill the box exactly
    if fit != FitMode::Fit {
        if width < box_width {
            width = box_width;
            height = width / aspect_ratio;
        }
        if height < box_height {
            height = box_height;
            width = height * aspect_ratio;
        }
    }

    Ok((width.ceil() as u32, height.ceil() as u32))
}

/// Resize an image into a bounding box, honoring fit mode and upscale
/// policy. Anchor fit modes resample past the box and crop the overshoot
/// away around the anchor, so the result matches the box exactly.
pub fn resize(
    image: DynamicImage,
    options: &ResizeOptions,
    algorithm: ResizeAlgorithm,
) -> Result<DynamicImage> {
    let input = (image.width(), image.height());
    let box_width = options.width.unwrap_or(input.0);
    let box_height = options.height.unwrap_or(input.1);

    let target = scaled_size(input, (box_width, box_height), options.fit, options.upscale)?;

    let resized = if target == input {
        log::debug!("target size equals input size, skipping resample");
        image
    } else {
        log::debug!(
            "resizing image from {}x{} to {}x{}",
            input.0,
            input.1,
            target.0,
            target.1
        );
        image.resize_exact(target.0, target.1, algorithm.filter_type())
    };

    match options.fit {
        FitMode::Fit => Ok(resized),
        FitMode::Anchor(anchor) => {
            let (x1, y1, x2, y2) = crop_box(
                (resized.width(), resized.height()),
                box_width,
                box_height,
                anchor,
            );
            crop_to_box(&resized, (x1 as i64, y1 as i64, x2 as i64, y2 as i64))
        }
    }
}
