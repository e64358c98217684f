use tracing::{info, instrument};
use rayon::ThreadPool;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use crate::image_pipeline::{
    color_map::{ColorMapper, RgbImage, build_pool},
    common::error::{ConversionError, Result},
    lut::LutTable,
    tiff::{ImageReader, ImageWriter, StandardTiffReader, StandardTiffWriter, ApplyConfig},
};

/// Parses `lut_text` and applies it to `image` at `intensity`.
///
/// Either step failing aborts the whole operation; there is no partial output.
pub fn apply_lut(image: &RgbImage, lut_text: &str, intensity: f32) -> Result<RgbImage> {
    let lut = LutTable::parse(lut_text)?;
    let output = ColorMapper::new(&lut).apply(image, intensity)?;
    Ok(output)
}

pub struct LutApplyPipeline<R: ImageReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: ApplyConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl LutApplyPipeline<StandardTiffReader, StandardTiffWriter> {
    pub fn new(config: ApplyConfig) -> Result<Self> {
        Self::with_custom(StandardTiffReader, StandardTiffWriter, config)
    }
}

impl<R: ImageReader, W: ImageWriter> LutApplyPipeline<R, W> {
    /// Builds the worker pool for `config.threads` once, up front.
    pub fn with_custom(reader: R, writer: W, config: ApplyConfig) -> Result<Self> {
        let pool = config.threads.map(build_pool).transpose()?;
        Ok(Self {
            reader,
            writer,
            config,
            pool,
        })
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if width == 0 || height == 0 {
            return Err(ConversionError::InvalidDimensions(width, height));
        }

        Ok(())
    }

    /// Maps an already decoded image through an already parsed table.
    #[instrument(skip(self, image, lut), fields(lut_size = lut.size()))]
    pub fn apply(&self, image: &RgbImage, lut: &LutTable) -> Result<RgbImage> {
        self.validate_dimensions(image.width, image.height)?;

        let output = ColorMapper::new(lut)
            .with_pool(self.pool.clone())
            .apply(image, self.config.intensity)?;
        Ok(output)
    }

    #[instrument(skip(self, image_data, lut_text, output), fields(input_size = image_data.len()))]
    pub fn convert(&self, image_data: &[u8], lut_text: &str, output: &mut dyn Write) -> Result<()> {
        info!("Starting LUT application");

        let lut = {
            let _span = tracing::info_span!("parse_lut").entered();
            LutTable::parse(lut_text)?
        };

        let image = {
            let _span = tracing::info_span!("decode_image").entered();
            self.reader.read_image(image_data)?
        };

        let mapped = {
            let _span = tracing::info_span!("map_colors",
                width = image.width,
                height = image.height,
                intensity = self.config.intensity
            ).entered();
            self.apply(&image, &lut)?
        };

        {
            let _span = tracing::info_span!("encode_tiff").entered();
            self.writer.write_image(&mapped, output, &self.config)?;
        }

        info!(
            width = mapped.width,
            height = mapped.height,
            lut_size = lut.size(),
            "LUT application complete"
        );
        Ok(())
    }

    #[instrument(skip(self, input_path, lut_path, output_path))]
    pub fn convert_file<P: AsRef<Path>, L: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input_path: P,
        lut_path: L,
        output_path: Q,
    ) -> Result<()> {
        let input_path = input_path.as_ref();
        let lut_path = lut_path.as_ref();
        let output_path = output_path.as_ref();

        info!(
            input = %input_path.display(),
            lut = %lut_path.display(),
            output = %output_path.display(),
            "Converting file"
        );

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        let lut_text = {
            let _span = tracing::info_span!("read_lut_file").entered();
            std::fs::read_to_string(lut_path).map_err(|e| {
                ConversionError::InputReadError(format!("{}: {}", lut_path.display(), e))
            })?
        };

        // The output file is only created once encoding has succeeded.
        let mut encoded = Vec::new();
        self.convert(&input_data, &lut_text, &mut encoded)?;

        {
            let _span = tracing::info_span!("write_output_file").entered();
            std::fs::write(output_path, &encoded).map_err(|e| {
                ConversionError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?;
        }

        Ok(())
    }

    pub fn config(&self) -> &ApplyConfig {
        &self.config
    }

    /// Worker count of the dedicated pool, if `threads` was configured.
    pub fn worker_threads(&self) -> Option<usize> {
        self.pool.as_ref().map(|pool| pool.current_num_threads())
    }

    /// Replaces the config, rebuilding the worker pool only if `threads` changed.
    pub fn set_config(&mut self, config: ApplyConfig) -> Result<()> {
        if config.threads != self.config.threads {
            self.pool = config.threads.map(build_pool).transpose()?;
        }
        self.config = config;
        Ok(())
    }
}
