// rastermill/src/utils/mod.rs
use std::path::{Path, PathBuf};

use crate::core::Result;

/// Derive an output path for a derivative of `input_path`.
///
/// An explicit `output` wins. Otherwise the derivative lands next to the
/// input as `{stem}_{suffix}.{extension}`, bumping a counter rather than
/// overwriting an existing file.
pub fn generate_output_path(
    input_path: &Path,
    output: Option<&Path>,
    suffix: &str,
    extension: &str,
) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = input_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("image");

            let mut candidate = input_path.with_file_name(format!("{}_{}.{}", stem, suffix, extension));
            let mut counter = 1;

            while candidate.exists() {
                candidate = input_path
                    .with_file_name(format!("{}_{}_{}.{}", stem, suffix, counter, extension));
                counter += 1;
            }

            candidate
        }
    }
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = (bytes_f64.log10() / base.log10()).floor() as i32;
    let size = bytes_f64 / base.powi(exponent);

    format!("{:.2} {}", size, UNITS[exponent as usize])
}

pub fn calculate_aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        0.0
    } else {
        width as f32 / height as f32
    }
}

/// Probe dimensions and container format without decoding pixel data.
pub fn get_image_info(path: &Path) -> Result<(u32, u32, String)> {
    let reader = image::ImageReader::open(path)?.with_guessed_format()?;

    let format = reader
        .format()
        .map(image_format_to_string)
        .unwrap_or_else(|| "Unknown".to_string());

    let dimensions = reader.into_dimensions()?;

    Ok((dimensions.0, dimensions.1, format))
}

pub fn is_supported_format(path: &Path) -> bool {
    let extensions = [
        "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp",
    ];

    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn image_format_to_string(format: image::ImageFormat) -> String {
    match format {
        image::ImageFormat::Jpeg => "JPEG",
        image::ImageFormat::Png => "PNG",
        image::ImageFormat::Gif => "GIF",
        image::ImageFormat::WebP => "WebP",
        image::ImageFormat::Tiff => "TIFF",
        image::ImageFormat::Bmp => "BMP",
        image::ImageFormat::Ico => "ICO",
        image::ImageFormat::Avif => "AVIF",
        image::ImageFormat::Qoi => "QOI",
        _ => "Unknown",
    }
    .to_string()
}
