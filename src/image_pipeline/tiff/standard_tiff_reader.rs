//! TIFF image reader implementation using the tiff library.
//!
//! Only 8-bit images are accepted. RGB data is used as-is, RGBA has its
//! alpha channel dropped and grayscale is replicated into all three channels.

use std::io::Cursor;

use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use crate::image_pipeline::color_map::types::RgbImage;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::tiff::reader::ImageReader;

/// Decodes 8-bit TIFFs into interleaved RGB.
pub struct StandardTiffReader;

impl ImageReader for StandardTiffReader {
    fn read_image(&self, data: &[u8]) -> Result<RgbImage> {
        debug!("Decoding TIFF image, {} bytes", data.len());

        let decode_err = |e: tiff::TiffError| ConversionError::DecodeError(e.to_string());

        let mut decoder = Decoder::new(Cursor::new(data)).map_err(decode_err)?;
        let (width, height) = decoder.dimensions().map_err(decode_err)?;
        let color_type = decoder.colortype().map_err(decode_err)?;
        let (width, height) = (width as usize, height as usize);

        debug!("Decoded header: {}x{} {:?}", width, height, color_type);

        let samples = match decoder.read_image().map_err(decode_err)? {
            DecodingResult::U8(samples) => samples,
            _ => {
                return Err(ConversionError::UnsupportedFormat(format!(
                    "{:?} (only 8-bit samples are supported)",
                    color_type
                )));
            }
        };

        let rgb = match color_type {
            ColorType::RGB(8) => samples,
            ColorType::RGBA(8) => samples
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
            ColorType::Gray(8) => samples.iter().flat_map(|&v| [v, v, v]).collect(),
            other => {
                return Err(ConversionError::UnsupportedFormat(format!("{:?}", other)));
            }
        };

        let image = RgbImage {
            width,
            height,
            data: rgb,
        };
        image.check_len().map_err(|e| {
            ConversionError::DecodeError(format!("{}x{} image: {}", width, height, e))
        })?;

        Ok(image)
    }
}
