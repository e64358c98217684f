//! Pipeline conversions module
//!
//! This module contains orchestration logic for applying LUTs to images.

mod apply_lut;

#[cfg(test)]
mod tests;

pub use apply_lut::{LutApplyPipeline, apply_lut};
