//! LUT application configuration types

/// TIFF compression methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression (slow, good compression)
    Lzw,
    /// Deflate compression - fast level (good speed/size balance)
    DeflateFast,
    /// Deflate compression - best compression (slower)
    DeflateBest,
    /// Deflate compression - balanced
    DeflateBalanced,
}

/// Configuration for applying a LUT to an image
#[derive(Debug, Clone)]
pub struct ApplyConfig {
    /// Blend factor between the source (0.0) and the fully mapped image (1.0)
    pub intensity: f32,
    /// Compression method to use for the output TIFF
    pub compression: TiffCompression,
    /// Predictor value for compression (typically 2 for horizontal differencing)
    pub predictor: Option<u16>,
    /// Whether to reject images with a zero width or height
    pub validate_dimensions: bool,
    /// Worker count for the mapping step; `None` uses every available core
    pub threads: Option<usize>,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            compression: TiffCompression::None,
            predictor: None,
            validate_dimensions: true,
            threads: None,
        }
    }
}

impl ApplyConfig {
    pub fn builder() -> ApplyConfigBuilder {
        ApplyConfigBuilder::default()
    }
}

/// Builder for ApplyConfig
#[derive(Default)]
pub struct ApplyConfigBuilder {
    intensity: Option<f32>,
    compression: Option<TiffCompression>,
    predictor: Option<Option<u16>>,
    validate_dimensions: Option<bool>,
    threads: Option<Option<usize>>,
}

impl ApplyConfigBuilder {
    pub fn intensity(mut self, intensity: f32) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn predictor(mut self, predictor: Option<u16>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn build(self) -> ApplyConfig {
        let default = ApplyConfig::default();
        ApplyConfig {
            intensity: self.intensity.unwrap_or(default.intensity),
            compression: self.compression.unwrap_or(default.compression),
            predictor: self.predictor.unwrap_or(default.predictor),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            threads: self.threads.unwrap_or(default.threads),
        }
    }
}
