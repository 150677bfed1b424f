// rastermill/src/processors/flip.rs
use image::DynamicImage;

use crate::core::Flip;

/// Mirror the image along an axis. Lossless; `Flip::None` is the identity.
pub fn flip(image: DynamicImage, axis: Flip) -> DynamicImage {
    match axis {
        Flip::None => image,
        Flip::Horizontal => image.fliph(),
        Flip::Vertical => image.flipv(),
    }
}
