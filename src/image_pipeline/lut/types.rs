//! 3D LUT data types

use crate::image_pipeline::common::error::ParseError;

/// Input colour range covered by a LUT, per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            min: [0.0; 3],
            max: [1.0; 3],
        }
    }
}

impl Domain {
    pub fn new(min: [f32; 3], max: [f32; 3]) -> Result<Self, ParseError> {
        for axis in 0..3 {
            if !(min[axis] < max[axis]) {
                return Err(ParseError::InvalidDomain {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(Self { min, max })
    }

    /// Maps a colour into `[0, 1]` relative to this domain, clamping anything outside it.
    pub fn normalize(&self, color: [f32; 3]) -> [f32; 3] {
        let mut out = [0.0; 3];
        for axis in 0..3 {
            let span = self.max[axis] - self.min[axis];
            out[axis] = ((color[axis] - self.min[axis]) / span).clamp(0.0, 1.0);
        }
        out
    }
}

/// An N×N×N grid of RGB samples.
///
/// Entries are stored in `.cube` row order: red varies fastest, then green,
/// then blue. The entry for lattice point `(r, g, b)` lives at
/// `r + g * N + b * N * N`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    size: usize,
    values: Vec<[f32; 3]>,
}

impl Lattice {
    /// Builds a lattice, checking that exactly `size^3` values were supplied.
    pub fn new(size: usize, values: Vec<[f32; 3]>) -> Result<Self, ParseError> {
        let expected = size.checked_pow(3);
        if expected != Some(values.len()) {
            return Err(ParseError::SizeMismatch {
                declared: Some(size),
                rows: values.len(),
            });
        }
        Ok(Self { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, r: usize, g: usize, b: usize) -> Option<[f32; 3]> {
        if r >= self.size || g >= self.size || b >= self.size {
            return None;
        }
        self.values.get(self.index(r, g, b)).copied()
    }

    /// Samples in file row order.
    pub fn values(&self) -> &[[f32; 3]] {
        &self.values
    }

    #[inline]
    pub(crate) fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + self.size * (g + self.size * b)
    }

    /// Unchecked-by-contract accessor for the interpolation hot path.
    /// Callers clamp coordinates to `[0, N-1]`; slice indexing still panics
    /// rather than reading out of bounds if that contract is broken.
    #[inline]
    pub(crate) fn at(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        debug_assert!(r < self.size && g < self.size && b < self.size);
        self.values[self.index(r, g, b)]
    }
}

/// A parsed 3D colour LUT. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LutTable {
    pub title: Option<String>,
    pub domain: Domain,
    pub lattice: Lattice,
}

impl LutTable {
    pub fn new(title: Option<String>, domain: Domain, lattice: Lattice) -> Self {
        Self {
            title,
            domain,
            lattice,
        }
    }

    /// A table that maps every colour to itself.
    pub fn identity(size: usize) -> Self {
        let step = if size > 1 { (size - 1) as f32 } else { 1.0 };
        let mut values = Vec::with_capacity(size * size * size);
        for b in 0..size {
            for g in 0..size {
                for r in 0..size {
                    values.push([r as f32 / step, g as f32 / step, b as f32 / step]);
                }
            }
        }

        Self {
            title: Some("Identity".to_string()),
            domain: Domain::default(),
            lattice: Lattice { size, values },
        }
    }

    pub fn size(&self) -> usize {
        self.lattice.size()
    }
}
