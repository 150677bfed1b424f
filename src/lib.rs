mod cli;
mod core;
mod processors;
mod utils;

pub use crate::cli::{Algorithm, Cli, Commands, RecipeArgs};
pub use crate::core::engine::{process, process_bytes, process_path, DefaultEngine, Engine};
pub use crate::core::{
    Anchor, EncodedArtifact, Error, FileType, FitMode, Flip, ProcessingStats, Recipe,
    ResizeAlgorithm, Result, RotateCropMode,
};
pub use crate::processors::{
    crop, crop_box, crop_to_box, flip, resize, rotate, rotate_crop, rotated_rect_aspect_ratio,
    rotated_rect_max_area, scaled_size, BatchProcessor, CropOptions, Encoder, Loader,
    MetadataReader, ResizeOptions, RotateCropOptions, RotateOptions,
};
pub use crate::utils::{
    calculate_aspect_ratio, format_file_size, generate_output_path, get_image_info,
    is_supported_format,
};

pub mod prelude {
    pub use crate::{
        crop, flip, resize, rotate, rotate_crop, BatchProcessor, DefaultEngine, Encoder, Engine,
        FileType, FitMode, Flip, Loader, Recipe, RotateCropMode,
    };
}

// Re-export commonly used types
pub use image::DynamicImage;
