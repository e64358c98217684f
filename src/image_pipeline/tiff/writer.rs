use std::io::Write;
use crate::image_pipeline::color_map::types::RgbImage;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::tiff::types::ApplyConfig;

pub trait ImageWriter {
    fn write_image(&self, image: &RgbImage, output: &mut dyn Write, config: &ApplyConfig) -> Result<()>;
}
