// rastermill/src/processors/rotate.rs
use image::{imageops, ColorType, DynamicImage, GenericImageView, Rgba, RgbaImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};

use super::anchor::{crop_box, crop_to_box};
use crate::core::{Anchor, Result, RotateCropMode};

/// Options for plain rotation.
#[derive(Debug, Clone)]
pub struct RotateOptions {
    /// Signed degrees, counter-clockwise.
    pub degrees: i32,
    /// Extend the canvas so no source pixel is clipped away.
    pub extend: bool,
    /// RGBA background for the regions the rotation exposes. `None` leaves
    /// them transparent (alpha modes) or black (opaque modes).
    pub color: Option<[u8; 4]>,
    /// Keep the RGBA result when the fill color is translucent, instead of
    /// converting back to the source color mode.
    pub preserve_transparency: bool,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self {
            degrees: 0,
            extend: true,
            color: None,
            preserve_transparency: true,
        }
    }
}

/// Options for rotation followed by a background-removing crop.
#[derive(Debug, Clone)]
pub struct RotateCropOptions {
    pub degrees: i32,
    pub crop_mode: RotateCropMode,
}

impl Default for RotateCropOptions {
    fn default() -> Self {
        Self {
            degrees: 0,
            crop_mode: RotateCropMode::AspectRatio,
        }
    }
}

/// Rotate an image by an arbitrary angle.
///
/// Multiples of 90 degrees take a lossless transposition fast path: no
/// resampling, no fill color, and `degrees = 0` returns the input
/// untouched. Every other angle goes through a bicubic warp on an RGBA
/// copy of the image, with the canvas extended to the rotated bounds when
/// `extend` is set.
pub fn rotate(image: DynamicImage, options: &RotateOptions) -> Result<DynamicImage> {
    if options.degrees % 90 == 0 {
        return Ok(transpose(image, options.degrees));
    }

    let original_color = image.color();
    let (input_width, input_height) = (image.width(), image.height());
    let source = image.to_rgba8();

    // Positive degrees turn counter-clockwise on screen; with y growing
    // downward that is a negative mathematical angle.
    let theta = -(options.degrees as f64).to_radians();

    let (out_width, out_height) = if options.extend {
        extended_bounds(input_width, input_height, theta)
    } else {
        (input_width, input_height)
    };

    log::debug!(
        "rotating {} degrees: {}x{} -> {}x{}",
        options.degrees,
        input_width,
        input_height,
        out_width,
        out_height
    );

    let mut rotated = RgbaImage::new(out_width, out_height);
    let projection = Projection::translate(out_width as f32 * 0.5, out_height as f32 * 0.5)
        * Projection::rotate(theta as f32)
        * Projection::translate(input_width as f32 * -0.5, input_height as f32 * -0.5);
    warp_into(
        &source,
        &projection,
        Interpolation::Bicubic,
        Rgba([0, 0, 0, 0]),
        &mut rotated,
    );

    if let Some(color) = options.color {
        let mut background = RgbaImage::from_pixel(out_width, out_height, Rgba(color));
        imageops::overlay(&mut background, &rotated, 0, 0);
        let composited = DynamicImage::ImageRgba8(background);

        if !options.preserve_transparency || color[3] == 255 {
            Ok(restore_color(composited, original_color))
        } else {
            Ok(composited)
        }
    } else {
        Ok(restore_color(
            DynamicImage::ImageRgba8(rotated),
            original_color,
        ))
    }
}

/// Rotate, then crop away the background the rotation exposed.
///
/// The canvas is always extended and never color-filled here; the crop
/// removes the exposed regions instead. 90-degree multiples return the
/// transposed image as-is since transposition exposes nothing.
pub fn rotate_crop(image: DynamicImage, options: &RotateCropOptions) -> Result<DynamicImage> {
    let input_size = (image.width(), image.height());

    let rotated = rotate(
        image,
        &RotateOptions {
            degrees: options.degrees,
            extend: true,
            color: None,
            preserve_transparency: true,
        },
    )?;

    if options.degrees % 90 == 0 {
        return Ok(rotated);
    }

    let rotated_size = (rotated.width(), rotated.height());
    let (width, height) = match options.crop_mode {
        RotateCropMode::AspectRatio => {
            rotated_rect_aspect_ratio(input_size, rotated_size, options.degrees)
        }
        RotateCropMode::MaxArea => rotated_rect_max_area(input_size, options.degrees),
    };

    let (x1, y1, x2, y2) = crop_box(rotated_size, width, height, Anchor::Center);
    crop_to_box(&rotated, (x1 as i64, y1 as i64, x2 as i64, y2 as i64))
}

fn transpose(image: DynamicImage, degrees: i32) -> DynamicImage {
    // image::rotate90 turns clockwise; positive degrees here are
    // counter-clockwise, hence the reversed mapping.
    match degrees.rem_euclid(360) {
        90 => image.rotate270(),
        180 => image.rotate180(),
        270 => image.rotate90(),
        _ => image,
    }
}

/// Canvas size that contains the whole source after rotating by `theta`.
fn extended_bounds(width: u32, height: u32, theta: f64) -> (u32, u32) {
    let (sin_a, cos_a) = (theta.sin().abs(), theta.cos().abs());
    let (width, height) = (width as f64, height as f64);

    (
        (width * cos_a + height * sin_a).ceil() as u32,
        (width * sin_a + height * cos_a).ceil() as u32,
    )
}

/// Size of the largest crop of the rotated image that keeps the source
/// aspect ratio.
pub fn rotated_rect_aspect_ratio(
    input: (u32, u32),
    rotated: (u32, u32),
    degrees: i32,
) -> (u32, u32) {
    let aspect_ratio = input.0 as f64 / input.1 as f64;
    let rotated_aspect_ratio = rotated.0 as f64 / rotated.1 as f64;
    let angle = (degrees as f64).abs().to_radians();

    let total_height = if aspect_ratio < 1.0 {
        input.0 as f64 / rotated_aspect_ratio
    } else {
        input.1 as f64
    };

    let height = total_height / (aspect_ratio * angle.sin() + angle.cos());
    let width = height * aspect_ratio;

    (width.trunc() as u32, height.trunc() as u32)
}

/// Size of the largest axis-aligned rectangle inscribed in the source
/// rectangle after rotating it by `degrees`.
///
/// The angle deliberately keeps its sign; only the trigonometric values
/// are folded into the first quadrant. The solutions for `angle`,
/// `-angle` and `180 - angle` coincide, so |sin| and |cos| cover every
/// case.
pub fn rotated_rect_max_area(input: (u32, u32), degrees: i32) -> (u32, u32) {
    if input.0 == 0 || input.1 == 0 {
        return (0, 0);
    }

    let (input_width, input_height) = (input.0 as f64, input.1 as f64);
    let angle = (degrees as f64).to_radians();

    let width_is_longer = input_width >= input_height;
    let (side_long, side_short) = if width_is_longer {
        (input_width, input_height)
    } else {
        (input_height, input_width)
    };

    let (sin_a, cos_a) = (angle.sin().abs(), angle.cos().abs());

    let (width, height) = if side_short <= 2.0 * sin_a * cos_a * side_long {
        // half constrained: two crop corners touch the longer side, the
        // other two sit on the mid-line parallel to it
        let x = 0.5 * side_short;
        if width_is_longer {
            (x / sin_a, x / cos_a)
        } else {
            (x / cos_a, x / sin_a)
        }
    } else {
        // fully constrained: the crop touches all four sides
        let cos_2a = cos_a * cos_a - sin_a * sin_a;
        (
            (input_width * cos_a - input_height * sin_a) / cos_2a,
            (input_height * cos_a - input_width * sin_a) / cos_2a,
        )
    };

    (width.trunc() as u32, height.trunc() as u32)
}

/// Convert a working RGBA image back to the color mode the source had.
fn restore_color(image: DynamicImage, color: ColorType) -> DynamicImage {
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(image.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(image.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(image.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(image.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(image.to_rgba32f()),
        _ => image,
    }
}
