// rastermill/src/processors/metadata.rs
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use exif::{Exif, Reader};

use crate::core::{Error, Result};

/// Reads EXIF metadata from source files for inspection. The pipeline
/// itself never consults EXIF; this backs the CLI `info` command only.
pub struct MetadataReader;

impl MetadataReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &Path) -> Result<Option<Exif>> {
        let file = File::open(path)?;
        let mut bufreader = BufReader::new(&file);

        match Reader::new().read_from_container(&mut bufreader) {
            Ok(exif) => {
                log::debug!("found EXIF data in {}", path.display());
                Ok(Some(exif))
            }
            Err(exif::Error::NotFound(_)) => {
                log::debug!("no EXIF data found in {}", path.display());
                Ok(None)
            }
            Err(e) => Err(Error::Processing(format!("EXIF read error: {}", e))),
        }
    }

    pub fn has_metadata(&self, path: &Path) -> Result<bool> {
        Ok(self.read(path)?.is_some())
    }
}

impl Default for MetadataReader {
    fn default() -> Self {
        Self::new()
    }
}
