// rastermill/src/core/engine.rs
use std::io::{BufRead, Seek};
use std::path::Path;

use image::DynamicImage;

use crate::core::{EncodedArtifact, Flip, Recipe, ResizeAlgorithm, Result};
use crate::processors::{
    crop, flip, resize, rotate, rotate_crop, CropOptions, Encoder, Loader, ResizeOptions,
    RotateCropOptions, RotateOptions,
};

/// A full processing pipeline: transforms a decoded image according to a
/// recipe, then encodes the result.
///
/// `pre_process` and `post_process` are identity hooks around the
/// transformation sequence; implementations override them to inject
/// behavior without touching the operator order. Hosts that need a
/// different pipeline altogether substitute their own `Engine` at the
/// boundary functions below.
pub trait Engine {
    fn pre_process(&self, image: DynamicImage, _recipe: &Recipe) -> Result<DynamicImage> {
        Ok(image)
    }

    fn post_process(&self, image: DynamicImage, _recipe: &Recipe) -> Result<DynamicImage> {
        Ok(image)
    }

    fn transform(&self, image: DynamicImage, recipe: &Recipe) -> Result<DynamicImage>;

    fn encode(&self, image: &DynamicImage, recipe: &Recipe) -> Result<EncodedArtifact>;

    /// Run the whole pipeline: validate, pre hook, transform, post hook,
    /// encode. Parameter errors surface here before any pixel is touched.
    fn process(&self, image: DynamicImage, recipe: &Recipe) -> Result<EncodedArtifact> {
        recipe.validate()?;
        let image = self.pre_process(image, recipe)?;
        let image = self.transform(image, recipe)?;
        let image = self.post_process(image, recipe)?;
        self.encode(&image, recipe)
    }
}

/// The stock pipeline: flip, rotate (plain or background-removing), crop,
/// resize, in that fixed order, each stage gated on its recipe field.
#[derive(Debug, Clone, Default)]
pub struct DefaultEngine {
    algorithm: ResizeAlgorithm,
    optimize_png: bool,
}

impl DefaultEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: ResizeAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }
}

impl Engine for DefaultEngine {
    fn transform(&self, mut image: DynamicImage, recipe: &Recipe) -> Result<DynamicImage> {
        if recipe.flip != Flip::None {
            image = flip(image, recipe.flip);
        }

        if let Some(degrees) = recipe.rotate.filter(|degrees| *degrees != 0) {
            image = match recipe.rotate_crop {
                Some(crop_mode) => rotate_crop(image, &RotateCropOptions { degrees, crop_mode })?,
                None => rotate(
                    image,
                    &RotateOptions {
                        degrees,
                        color: recipe.rotate_color,
                        preserve_transparency: false,
                        ..Default::default()
                    },
                )?,
            };
        }

        if recipe.crop.is_some() {
            image = crop(
                image,
                &CropOptions {
                    crop_box: recipe.crop,
                    ..Default::default()
                },
            )?;
        }

        if recipe.width.is_some() || recipe.height.is_some() {
            image = resize(
                image,
                &ResizeOptions {
                    width: recipe.width,
                    height: recipe.height,
                    fit: recipe.fit,
                    upscale: recipe.upscale,
                },
                self.algorithm,
            )?;
        }

        Ok(image)
    }

    fn encode(&self, image: &DynamicImage, recipe: &Recipe) -> Result<EncodedArtifact> {
        Encoder::new()
            .with_png_optimization(self.optimize_png)
            .encode(image, recipe.file_type, recipe.quality)
    }
}

/// Process an already-open readable handle with an explicit engine.
///
/// The read cursor is rewound before and after decoding, so the handle can
/// be reused by the caller.
pub fn process<R: BufRead + Seek>(
    engine: &dyn Engine,
    source: &mut R,
    recipe: &Recipe,
) -> Result<EncodedArtifact> {
    let image = Loader::new().load_from_reader(source)?;
    engine.process(image, recipe)
}

pub fn process_bytes(engine: &dyn Engine, data: &[u8], recipe: &Recipe) -> Result<EncodedArtifact> {
    let image = Loader::new().load_from_bytes(data)?;
    engine.process(image, recipe)
}

pub fn process_path(engine: &dyn Engine, path: &Path, recipe: &Recipe) -> Result<EncodedArtifact> {
    let image = Loader::new().load(path)?;
    engine.process(image, recipe)
}
