//! Common utilities module
//!
//! This module contains the error types shared across the LUT pipeline.

pub mod error;

pub use error::{ConversionError, MapError, ParseError, Result};
