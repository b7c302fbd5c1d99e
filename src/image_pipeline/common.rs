//! Shared error types
//!
//! Every stage of the pipeline (HEIC bridge, PNG writer, QR scan) reports
//! failures through [`ConversionError`].

pub mod error;

pub use error::{ConversionError, Result};
