// rastermill/src/processors/mod.rs
mod anchor;
mod batch;
mod crop;
mod encoder;
mod flip;
mod loader;
mod metadata;
mod resize;
mod rotate;

pub use anchor::{crop_box, crop_to_box};
pub use batch::BatchProcessor;
pub use crop::{crop, CropOptions};
pub use encoder::Encoder;
pub use flip::flip;
pub use loader::Loader;
pub use metadata::MetadataReader;
pub use resize::{resize, scaled_size, ResizeOptions};
pub use rotate::{
    rotate, rotate_crop, rotated_rect_aspect_ratio, rotated_rect_max_area, RotateCropOptions,
    RotateOptions,
};

pub mod prelude {
    pub use super::{
        crop, crop_box, flip, resize, rotate, rotate_crop, BatchProcessor, CropOptions, Encoder,
        Loader, MetadataReader, ResizeOptions, RotateCropOptions, RotateOptions,
    };
}
