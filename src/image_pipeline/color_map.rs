//! Colour mapping module
//!
//! Samples a [`LutTable`](crate::image_pipeline::LutTable) for every pixel of
//! an 8-bit RGB image with trilinear interpolation, then blends the mapped
//! colour with the source at a caller-chosen intensity.

mod mapper;
mod trilinear;
pub mod types;

pub use mapper::{ColorMapper, apply, build_pool, map_image};
pub use types::{BlendParams, RgbImage};
