// rastermill/src/processors/loader.rs
use std::io::{BufRead, Cursor, Seek, SeekFrom};
use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageReader};

use crate::core::{Error, Result};

/// Decode boundary for source images.
///
/// Accepts a path, a byte slice, or an already-open seekable handle. For
/// handles the read cursor is rewound to the start before decoding and
/// again afterwards, so callers can hand the same reader elsewhere.
#[derive(Clone)]
pub struct Loader {
    max_dimensions: Option<(u32, u32)>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: Some((100_000, 100_000)),
        }
    }

    pub fn with_max_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_dimensions = Some((width, height));
        self
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("loading image from: {}", path.display());

        if !path.exists() {
            return Err(Error::InvalidParameter(format!(
                "file does not exist: {}",
                path.display()
            )));
        }
        if path.metadata()?.len() == 0 {
            return Err(Error::InvalidParameter(format!(
                "file is empty: {}",
                path.display()
            )));
        }

        let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        self.check_dimensions(&image)?;

        log::info!(
            "loaded image: {}x{} pixels, color: {:?}",
            image.width(),
            image.height(),
            image.color()
        );

        Ok(image)
    }

    pub fn load_from_bytes(&self, data: &[u8]) -> Result<DynamicImage> {
        self.load_from_reader(&mut Cursor::new(data))
    }

    pub fn load_from_reader<R: BufRead + Seek>(&self, reader: &mut R) -> Result<DynamicImage> {
        reader.seek(SeekFrom::Start(0))?;
        let image = ImageReader::new(&mut *reader)
            .with_guessed_format()?
            .decode()?;
        reader.seek(SeekFrom::Start(0))?;

        self.check_dimensions(&image)?;
        Ok(image)
    }

    fn check_dimensions(&self, image: &DynamicImage) -> Result<()> {
        if let Some((max_width, max_height)) = self.max_dimensions {
            let (width, height) = (image.width(), image.height());
            if width > max_width || height > max_height {
                return Err(Error::InvalidParameter(format!(
                    "image dimensions {}x{} exceed maximum {}x{}",
                    width, height, max_width, max_height
                )));
            }
        }
        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
