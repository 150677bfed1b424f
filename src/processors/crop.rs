// rastermill/src/processors/crop.rs
use image::{DynamicImage, GenericImageView};

use super::anchor::crop_to_box;
use crate::core::Result;

/// Options for edge-relative cropping.
#[derive(Debug, Clone)]
pub struct CropOptions {
    /// Insets from each edge, `(x1, y1, x2, y2)`. `None` means no crop.
    pub crop_box: Option<[f64; 4]>,
    /// Interpret insets as percentages of the input size (default) or as
    /// absolute pixels.
    pub crop_percent: bool,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            crop_box: None,
            crop_percent: true,
        }
    }
}

/// Crop an image by insets relative to its edges.
///
/// The insets are converted to an absolute box anchored at the origin and
/// truncated to whole pixels. The operator itself does not validate the
/// result; an inverted box (opposing insets that cross) is rejected by the
/// crop primitive with `InvalidGeometry`.
pub fn crop(image: DynamicImage, options: &CropOptions) -> Result<DynamicImage> {
    let input_width = image.width() as f64;
    let input_height = image.height() as f64;

    let insets = options.crop_box.unwrap_or([0.0; 4]);

    let origin_box = if options.crop_percent {
        [
            insets[0] / 100.0 * input_width,
            insets[1] / 100.0 * input_height,
            input_width - insets[2] / 100.0 * input_width,
            input_height - insets[3] / 100.0 * input_height,
        ]
    } else {
        [
            insets[0],
            insets[1],
            input_width - insets[2],
            input_height - insets[3],
        ]
    };

    crop_to_box(
        &image,
        (
            origin_box[0].trunc() as i64,
            origin_box[1].trunc() as i64,
            origin_box[2].trunc() as i64,
            origin_box[3].trunc() as i64,
        ),
    )
}
