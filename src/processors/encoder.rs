// rastermill/src/processors/encoder.rs
use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage, GenericImageView, ImageFormat};
use oxipng::{optimize_from_memory, Options};

use crate::core::{EncodedArtifact, Error, FileType, Result};

/// Serializes a processed image into an `EncodedArtifact`.
pub struct Encoder {
    optimize_png: bool,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            optimize_png: false,
        }
    }

    /// Run oxipng over PNG output. Off unless asked for; the optimization
    /// pass costs far more than the encode itself.
    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    /// Encode to the requested format.
    ///
    /// JPEG output is normalized to RGB first (no palette, grayscale or
    /// alpha reaches the JPEG encoder) and honors `quality` when given,
    /// falling back to the encoder default. PNG passes the color mode
    /// through untouched. The artifact's synthetic name carries only the
    /// format extension; real naming belongs to the storage layer.
    pub fn encode(
        &self,
        image: &DynamicImage,
        file_type: FileType,
        quality: Option<u8>,
    ) -> Result<EncodedArtifact> {
        let quality = quality.map(|q| q.clamp(1, 100));
        let mut buffer = Cursor::new(Vec::new());

        let bytes = match file_type {
            FileType::Jpeg => {
                let rgb;
                let image = if image.color() != ColorType::Rgb8 {
                    rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                    &rgb
                } else {
                    image
                };

                match quality {
                    Some(quality) => {
                        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
                        image.write_with_encoder(encoder)?;
                    }
                    None => image.write_to(&mut buffer, ImageFormat::Jpeg)?,
                }
                buffer.into_inner()
            }
            FileType::Png => {
                image.write_to(&mut buffer, ImageFormat::Png)?;
                let data = buffer.into_inner();
                if self.optimize_png {
                    optimize_from_memory(&data, &Options::default()).map_err(|e| {
                        Error::Processing(format!("PNG optimization failed: {}", e))
                    })?
                } else {
                    data
                }
            }
        };

        log::debug!(
            "encoded {} artifact: {}x{}, {} bytes",
            file_type.name(),
            image.width(),
            image.height(),
            bytes.len()
        );

        Ok(EncodedArtifact {
            bytes,
            file_type,
            file_name: format!(".{}", file_type.extension()),
            width: image.width(),
            height: image.height(),
        })
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}
