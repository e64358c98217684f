//! LUT application pipeline module
//!
//! This module provides a structured approach to colour grading with 3D LUTs,
//! with separate modules for `.cube` parsing, colour mapping, TIFF I/O and
//! orchestration.

pub mod lut;
pub mod color_map;
pub mod tiff;
pub mod conversions;
pub mod common;

pub use common::{
    ConversionError,
    MapError,
    ParseError,
    Result,
};

pub use lut::{
    Domain,
    Lattice,
    LutTable,
};

pub use color_map::{
    BlendParams,
    ColorMapper,
    RgbImage,
    build_pool,
};

pub use tiff::{
    TiffCompression,
    ApplyConfig,
    ApplyConfigBuilder,
    ImageReader,
    ImageWriter,
    StandardTiffReader,
    StandardTiffWriter,
};

pub use conversions::{
    LutApplyPipeline,
    apply_lut,
};
