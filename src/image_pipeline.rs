//! Image processing pipeline module
//!
//! This module provides a structured approach to the HEIC tools, with separate
//! modules for HEIC decoding, PNG writing, QR detection, and orchestration.

pub mod common;
pub mod conversions;
pub mod heif;
pub mod png;
pub mod qr;

pub use common::{
    ConversionError,
    Result,
};

pub use heif::{
    CodecBackend,
    DecodedImage,
    HeicImageReader,
    HeifBridge,
    LibheifBackend,
    copy_plane,
};

pub use self::png::{
    ConversionConfig,
    ConversionConfigBuilder,
    PngCompression,
    PngWriter,
    StandardPngWriter,
};

pub use qr::{
    ImageSource,
    QrDetector,
    Region,
    RqrrDetector,
};

pub use conversions::{
    HeicToPngPipeline,
    QrScanPipeline,
    png_output_path,
};
