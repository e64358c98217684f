//! TIFF reading and writing module
//!
//! This module decodes source images and encodes LUT-mapped results, with
//! various compression options for the output.

mod reader;
mod writer;
mod standard_tiff_reader;
mod standard_tiff_writer;
pub mod types;

pub use reader::ImageReader;
pub use writer::ImageWriter;
pub use standard_tiff_reader::StandardTiffReader;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, ApplyConfig, ApplyConfigBuilder};
