use std::sync::Arc;

use rayon::ThreadPool;
use rayon::prelude::*;
use tracing::debug;

use crate::image_pipeline::color_map::types::{BlendParams, RgbImage};
use crate::image_pipeline::common::error::MapError;
use crate::image_pipeline::lut::LutTable;

/// Maps 8-bit RGB images through a borrowed [`LutTable`].
///
/// Rows are processed in parallel; the table is shared read-only across
/// workers and every worker writes a disjoint row of the output.
pub struct ColorMapper<'a> {
    lut: &'a LutTable,
    pool: Option<Arc<ThreadPool>>,
}

/// Builds a dedicated pool of `threads` workers.
pub fn build_pool(threads: usize) -> Result<Arc<ThreadPool>, MapError> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map(Arc::new)
        .map_err(|e| MapError::ThreadPool(e.to_string()))
}

impl<'a> ColorMapper<'a> {
    pub fn new(lut: &'a LutTable) -> Self {
        Self { lut, pool: None }
    }

    /// Runs on a dedicated pool of `threads` workers instead of rayon's global
    /// pool. The pool is built here once and reused by every `apply` call.
    pub fn with_threads(self, threads: Option<usize>) -> Result<Self, MapError> {
        let pool = threads.map(build_pool).transpose()?;
        Ok(Self { pool, ..self })
    }

    /// Runs on an existing pool, shared with whoever else holds it.
    pub fn with_pool(mut self, pool: Option<Arc<ThreadPool>>) -> Self {
        self.pool = pool;
        self
    }

    /// Worker count of the dedicated pool, if there is one.
    pub fn worker_threads(&self) -> Option<usize> {
        self.pool.as_ref().map(|pool| pool.current_num_threads())
    }

    /// Maps `source` through the LUT and blends the result back over it.
    pub fn apply(&self, source: &RgbImage, intensity: f32) -> Result<RgbImage, MapError> {
        let params = BlendParams::new(intensity)?;
        self.check_lattice()?;
        source.check_len()?;

        debug!(
            width = source.width,
            height = source.height,
            lut_size = self.lut.size(),
            intensity = params.intensity(),
            "Applying LUT"
        );

        let data = match &self.pool {
            Some(pool) => pool.install(|| self.map_rows(source, params)),
            None => self.map_rows(source, params),
        };

        Ok(RgbImage {
            width: source.width,
            height: source.height,
            data,
        })
    }

    /// Trilinear mapping with no blending term.
    pub fn map_image(&self, source: &RgbImage) -> Result<RgbImage, MapError> {
        self.apply(source, 1.0)
    }

    /// Maps and blends a single pixel.
    #[inline]
    pub fn map_pixel(&self, pixel: [u8; 3], params: BlendParams) -> [u8; 3] {
        let normalized = pixel.map(|c| c as f32 / 255.0);
        let mapped = self.lut.sample(normalized).map(to_u8);
        [
            params.blend(pixel[0], mapped[0]),
            params.blend(pixel[1], mapped[1]),
            params.blend(pixel[2], mapped[2]),
        ]
    }

    fn check_lattice(&self) -> Result<(), MapError> {
        let size = self.lut.size();
        if size < 2 {
            return Err(MapError::EmptyLattice(size));
        }
        Ok(())
    }

    fn map_rows(&self, source: &RgbImage, params: BlendParams) -> Vec<u8> {
        let mut output = vec![0u8; source.data.len()];
        if output.is_empty() {
            return output;
        }
        // Non-empty data that passed `check_len` means `width * 3` fits.
        let row_len = source.width * 3;

        output
            .par_chunks_mut(row_len)
            .zip(source.data.par_chunks(row_len))
            .for_each(|(dst_row, src_row)| {
                for (dst, src) in dst_row.chunks_exact_mut(3).zip(src_row.chunks_exact(3)) {
                    let mapped = self.map_pixel([src[0], src[1], src[2]], params);
                    dst.copy_from_slice(&mapped);
                }
            });

        output
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Maps `source` through `lut` and blends at `intensity`.
pub fn apply(source: &RgbImage, lut: &LutTable, intensity: f32) -> Result<RgbImage, MapError> {
    ColorMapper::new(lut).apply(source, intensity)
}

/// Maps `source` through `lut` with no blending.
pub fn map_image(source: &RgbImage, lut: &LutTable) -> Result<RgbImage, MapError> {
    ColorMapper::new(lut).map_image(source)
}
