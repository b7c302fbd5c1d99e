//! Pipeline conversions module
//!
//! This module contains orchestration logic for the HEIC to PNG conversion
//! and the QR code scan.

mod heic_to_png;
mod qr_scan;


pub use heic_to_png::{HeicToPngPipeline, png_output_path};
pub use qr_scan::QrScanPipeline;
