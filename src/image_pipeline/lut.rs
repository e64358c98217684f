//! 3D LUT module
//!
//! Parses `.cube` text into an immutable lattice of RGB samples.

mod parser;
pub mod types;

pub use parser::parse;
pub use types::{Domain, Lattice, LutTable};
