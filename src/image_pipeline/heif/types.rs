//! Decoded HEIC image types

use image::RgbImage;

use crate::image_pipeline::common::error::{ConversionError, Result};

/// Dense RGB pixels copied out of a decoded HEIC image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Row-major RGB pixel data [R, G, B, R, G, B, ...] without row padding
    pub pixels: Vec<u8>,
    /// Bytes per row as reported by the codec, may exceed `width * 3`
    pub source_stride: usize,
}

impl DecodedImage {
    pub const CHANNELS: usize = 3;

    /// Length of one dense row in bytes.
    pub fn row_bytes(&self) -> usize {
        self.width * Self::CHANNELS
    }

    /// Copy of the pixels with R and B swapped.
    pub fn to_bgr(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(Self::CHANNELS)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect()
    }

    pub fn into_rgb_image(self) -> Result<RgbImage> {
        let (width, height) = (self.width, self.height);
        let w = u32::try_from(width).map_err(|_| ConversionError::InvalidDimensions(width, height))?;
        let h = u32::try_from(height).map_err(|_| ConversionError::InvalidDimensions(width, height))?;

        RgbImage::from_raw(w, h, self.pixels).ok_or_else(|| {
            ConversionError::InvalidPlane(format!(
                "pixel buffer does not hold {}x{} RGB pixels",
                width, height
            ))
        })
    }
}
