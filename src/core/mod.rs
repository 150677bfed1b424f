// rastermill/src/core/mod.rs
use std::str::FromStr;

use image::imageops::FilterType;
use thiserror::Error;

pub mod engine;

/// How the source image is mirrored before any other operation.
///
/// Keyword mapping follows the recipe vocabulary: the empty keyword keeps
/// the image as-is, `x`/`h` mirror left-right, every other non-empty
/// keyword mirrors top-bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horizontal,
    Vertical,
}

impl FromStr for Flip {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Flip::None),
            "x" | "h" => Ok(Flip::Horizontal),
            _ => Ok(Flip::Vertical),
        }
    }
}

/// Anchor point for crop boxes computed by `crop_box`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Center,
    Top,
    Left,
    Right,
    Bottom,
}

impl FromStr for Anchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "center" | "crop" | "fill" => Ok(Anchor::Center),
            "top" => Ok(Anchor::Top),
            "left" => Ok(Anchor::Left),
            "right" => Ok(Anchor::Right),
            "bottom" => Ok(Anchor::Bottom),
            other => Err(Error::InvalidParameter(format!(
                "unsupported anchor `{}`",
                other
            ))),
        }
    }
}

/// How an image is fitted into the resize bounding box.
///
/// `Fit` shrinks the longest side into the box while preserving aspect
/// ratio; the anchor modes oversize the image to cover the box and then
/// crop around the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitMode {
    #[default]
    Fit,
    Anchor(Anchor),
}

impl FromStr for FitMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fit" => Ok(FitMode::Fit),
            other => Ok(FitMode::Anchor(other.parse().map_err(|_| {
                Error::InvalidParameter(format!("unsupported fit mode `{}`", other))
            })?)),
        }
    }
}

/// Sizing strategy for the crop applied after an arbitrary-angle rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateCropMode {
    /// Largest crop that keeps the source width:height ratio.
    AspectRatio,
    /// Largest axis-aligned rectangle inscribed in the rotated source.
    MaxArea,
}

impl FromStr for RotateCropMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aspect_ratio" => Ok(RotateCropMode::AspectRatio),
            "max_area" => Ok(RotateCropMode::MaxArea),
            other => Err(Error::InvalidParameter(format!(
                "unsupported rotate crop mode `{}`",
                other
            ))),
        }
    }
}

/// Target encoding for the processed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    Jpeg,
    Png,
}

impl FileType {
    /// File extension used for the synthetic artifact name.
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Jpeg => "jpg",
            FileType::Png => "png",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileType::Jpeg => "jpeg",
            FileType::Png => "png",
        }
    }
}

impl FromStr for FileType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "jpeg" | "jpg" => Ok(FileType::Jpeg),
            "png" => Ok(FileType::Png),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl ResizeAlgorithm {
    pub fn filter_type(&self) -> FilterType {
        match self {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for ResizeAlgorithm {
    fn default() -> Self {
        ResizeAlgorithm::Lanczos3
    }
}

/// Transformation parameters for one derivative.
///
/// A recipe is a plain bag of values; every invocation reads it immutably
/// and no state survives between invocations. Absent fields disable their
/// pipeline stage (see `DefaultEngine::transform`).
#[derive(Debug, Clone, Default)]
pub struct Recipe {
    pub flip: Flip,
    /// Signed degrees, counter-clockwise. `None` and `Some(0)` skip rotation.
    pub rotate: Option<i32>,
    /// Only meaningful while `rotate` is set.
    pub rotate_crop: Option<RotateCropMode>,
    /// RGBA background for cropless rotation. Ignored when `rotate_crop`
    /// is set.
    pub rotate_color: Option<[u8; 4]>,
    /// Edge-relative insets `(x1, y1, x2, y2)` in percent of the input size.
    pub crop: Option<[f64; 4]>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub upscale: bool,
    pub fit: FitMode,
    pub file_type: FileType,
    /// JPEG quality, 1-100. Other formats ignore it.
    pub quality: Option<u8>,
}

impl Recipe {
    pub fn validate(&self) -> Result<()> {
        if let Some(quality) = self.quality {
            if quality == 0 || quality > 100 {
                return Err(Error::InvalidParameter(
                    "quality must be between 1 and 100".to_string(),
                ));
            }
        }

        for dimension in [self.width, self.height].into_iter().flatten() {
            if dimension == 0 {
                return Err(Error::InvalidParameter(
                    "bounding box dimensions must be positive".to_string(),
                ));
            }
            if dimension > 100_000 {
                return Err(Error::InvalidParameter(
                    "dimensions too large (max 100,000 pixels)".to_string(),
                ));
            }
        }

        Ok(())
    }
}

/// Encoded output of one pipeline invocation.
///
/// The file name is synthetic, derived from the target format alone; the
/// storage layer owns real naming. Final dimensions ride along because the
/// metadata store records them next to the bytes.
#[derive(Debug, Clone)]
pub struct EncodedArtifact {
    pub bytes: Vec<u8>,
    pub file_type: FileType,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub processed_count: usize,
    pub total_size_before: u64,
    pub total_size_after: u64,
    pub errors: Vec<(String, String)>,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, Error>;
