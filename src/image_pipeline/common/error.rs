use thiserror::Error;

/// Failures while turning `.cube` text into a [`LutTable`](crate::image_pipeline::LutTable).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("LUT file contains no data rows")]
    EmptyFile,

    #[error("LUT size mismatch: declared size {declared:?}, found {rows} data rows")]
    SizeMismatch { declared: Option<usize>, rows: usize },

    #[error("Malformed LUT line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Invalid LUT domain on axis {axis}: min {min} is not below max {max}")]
    InvalidDomain { axis: usize, min: f32, max: f32 },

    #[error("Unsupported LUT format: {0}")]
    UnsupportedFormat(String),
}

/// Failures while mapping a pixel buffer through a LUT.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Intensity {0} is outside [0.0, 1.0]")]
    IntensityOutOfRange(f32),

    #[error("LUT lattice of size {0} is too small to interpolate (need at least 2)")]
    EmptyLattice(usize),

    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("LUT parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Color mapping error: {0}")]
    Map(#[from] MapError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
