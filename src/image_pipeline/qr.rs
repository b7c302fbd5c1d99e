//! QR code detection module
//!
//! Loads an image as luma (HEIC through the bridge, other formats through the
//! `image` crate) and hands it to a [`QrDetector`].

mod detector;
mod rqrr_detector;
mod source;

pub use detector::{DEFAULT_THRESHOLD, QrDetector};
pub use rqrr_detector::RqrrDetector;
pub use source::{ImageSource, Region, load_luma};
