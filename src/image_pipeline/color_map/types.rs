//! Types for colour mapping operations

use crate::image_pipeline::common::error::MapError;

/// 8-bit RGB image data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// RGB pixel data interleaved [R, G, B, R, G, B, ...], row-major
    pub data: Vec<u8>,
}

impl RgbImage {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, MapError> {
        let image = Self {
            width,
            height,
            data,
        };
        image.check_len()?;
        Ok(image)
    }

    /// A black image of the given size.
    pub fn blank(width: usize, height: usize) -> Result<Self, MapError> {
        let len = byte_len(width, height).ok_or(MapError::BufferSizeMismatch {
            expected: usize::MAX,
            actual: 0,
        })?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// `width * height * 3`, or `None` if that overflows `usize`.
    pub fn expected_len(&self) -> Option<usize> {
        byte_len(self.width, self.height)
    }

    /// An overflowing size is reported with `expected: usize::MAX`.
    pub fn check_len(&self) -> Result<(), MapError> {
        match self.expected_len() {
            Some(expected) if expected == self.data.len() => Ok(()),
            expected => Err(MapError::BufferSizeMismatch {
                expected: expected.unwrap_or(usize::MAX),
                actual: self.data.len(),
            }),
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y.checked_mul(self.width)?.checked_add(x)?.checked_mul(3)?;
        match self.data.get(i..i.checked_add(3)?)? {
            &[r, g, b] => Some([r, g, b]),
            _ => None,
        }
    }
}

fn byte_len(width: usize, height: usize) -> Option<usize> {
    width.checked_mul(height)?.checked_mul(3)
}

/// How much of the LUT-mapped colour ends up in the output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendParams {
    intensity: f32,
}

impl BlendParams {
    /// Rejects anything outside `[0.0, 1.0]`, NaN included.
    pub fn new(intensity: f32) -> Result<Self, MapError> {
        if !(0.0..=1.0).contains(&intensity) {
            return Err(MapError::IntensityOutOfRange(intensity));
        }
        Ok(Self { intensity })
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Mixes one 8-bit channel: `source * (1 - intensity) + mapped * intensity`.
    #[inline]
    pub fn blend(&self, source: u8, mapped: u8) -> u8 {
        let mixed = source as f32 * (1.0 - self.intensity) + mapped as f32 * self.intensity;
        mixed.round().clamp(0.0, 255.0) as u8
    }
}

impl Default for BlendParams {
    fn default() -> Self {
        Self { intensity: 1.0 }
    }
}
