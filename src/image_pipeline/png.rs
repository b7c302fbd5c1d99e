//! PNG writing module
//!
//! This module provides 8-bit RGB PNG writing with configurable compression.

mod standard_png_writer;
pub mod types;
mod writer;


pub use standard_png_writer::StandardPngWriter;
pub use types::{ConversionConfig, ConversionConfigBuilder, PngCompression};
pub use writer::PngWriter;
