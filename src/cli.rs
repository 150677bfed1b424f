// rastermill/src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::core::{Error, Recipe, ResizeAlgorithm, Result};

#[derive(Parser)]
#[command(
    name = "rastermill",
    version,
    about = "Recipe-driven image derivative pipeline"
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Apply a recipe to one image and write the encoded result
    Process {
        input: PathBuf,

        /// Output file (defaults to a sibling of the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        recipe: RecipeArgs,

        /// Resampling algorithm
        #[arg(long, value_enum, default_value_t = Algorithm::Lanczos3)]
        algorithm: Algorithm,

        /// Run oxipng over PNG output
        #[arg(long)]
        optimize_png: bool,
    },

    /// Apply one recipe to every image in a directory
    Batch {
        input: PathBuf,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        recipe: RecipeArgs,

        /// Resampling algorithm
        #[arg(long, value_enum, default_value_t = Algorithm::Lanczos3)]
        algorithm: Algorithm,

        /// Run oxipng over PNG output
        #[arg(long)]
        optimize_png: bool,

        /// Worker threads (0 = rayon default)
        #[arg(short, long, default_value_t = 0)]
        threads: usize,

        /// Recurse into subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Print dimensions, format and EXIF metadata of an image
    Info { input: PathBuf },
}

/// Recipe fields as flat CLI flags. Keyword and tuple values stay strings
/// here and are parsed into the typed `Recipe` by `to_recipe`.
#[derive(Args)]
pub struct RecipeArgs {
    /// Flip keyword: `x`/`h` mirrors left-right, `y` top-bottom
    #[arg(long, default_value = "")]
    pub flip: String,

    /// Rotation in degrees, counter-clockwise
    #[arg(long)]
    pub rotate: Option<i32>,

    /// Crop away rotation background: `aspect_ratio` or `max_area`
    #[arg(long)]
    pub rotate_crop: Option<String>,

    /// Background fill for cropless rotation, `R,G,B,A`
    #[arg(long)]
    pub rotate_color: Option<String>,

    /// Edge-relative percentage insets, `x1,y1,x2,y2`
    #[arg(long)]
    pub crop: Option<String>,

    /// Bounding box width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Bounding box height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Allow enlarging past the source resolution
    #[arg(long)]
    pub upscale: bool,

    /// Fit mode: `fit`, `center`/`crop`/`fill`, `top`, `left`, `right`, `bottom`
    #[arg(long, default_value = "fit")]
    pub fit: String,

    /// Output format: `jpeg` or `png`
    #[arg(long, default_value = "jpeg")]
    pub file_type: String,

    /// JPEG quality (1-100)
    #[arg(long)]
    pub quality: Option<u8>,
}

impl RecipeArgs {
    pub fn to_recipe(&self) -> Result<Recipe> {
        let recipe = Recipe {
            flip: self.flip.parse()?,
            rotate: self.rotate,
            rotate_crop: self.rotate_crop.as_deref().map(str::parse).transpose()?,
            rotate_color: self.rotate_color.as_deref().map(parse_rgba).transpose()?,
            crop: self.crop.as_deref().map(parse_insets).transpose()?,
            width: self.width,
            height: self.height,
            upscale: self.upscale,
            fit: self.fit.parse()?,
            file_type: self.file_type.parse()?,
            quality: self.quality,
        };
        recipe.validate()?;
        Ok(recipe)
    }
}

/// `R,G,B,A` with each component clamped to 0-255.
fn parse_rgba(s: &str) -> Result<[u8; 4]> {
    let components: Vec<i64> = s
        .split(',')
        .map(|part| part.trim().parse::<i64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::InvalidParameter(format!("invalid color `{}`: expected R,G,B,A", s)))?;

    if components.len() != 4 {
        return Err(Error::InvalidParameter(format!(
            "invalid color `{}`: expected 4 components, got {}",
            s,
            components.len()
        )));
    }

    let mut color = [0u8; 4];
    for (slot, component) in color.iter_mut().zip(components) {
        *slot = component.clamp(0, 255) as u8;
    }
    Ok(color)
}

/// `x1,y1,x2,y2` non-negative edge insets.
fn parse_insets(s: &str) -> Result<[f64; 4]> {
    let values: Vec<f64> = s
        .split(',')
        .map(|part| part.trim().parse::<f64>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| {
            Error::InvalidParameter(format!("invalid crop `{}`: expected x1,y1,x2,y2", s))
        })?;

    if values.len() != 4 {
        return Err(Error::InvalidParameter(format!(
            "invalid crop `{}`: expected 4 components, got {}",
            s,
            values.len()
        )));
    }
    if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(Error::InvalidParameter(format!(
            "invalid crop `{}`: insets must be non-negative",
            s
        )));
    }

    Ok([values[0], values[1], values[2], values[3]])
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}
