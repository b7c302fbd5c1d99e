use std::io::Write;

use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::heif::types::DecodedImage;
use crate::image_pipeline::png::types::ConversionConfig;
use crate::image_pipeline::png::writer::PngWriter;

/// Writes 8-bit, non-interlaced RGB PNGs with the png crate.
pub struct StandardPngWriter;

fn encode_error(error: png::EncodingError) -> ConversionError {
    match error {
        png::EncodingError::IoError(e) => ConversionError::IoError(e),
        other => ConversionError::EncodeError(other.to_string()),
    }
}

impl PngWriter for StandardPngWriter {
    fn write_png(
        &self,
        image: &DecodedImage,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()> {
        debug!("Encoding PNG image: {}x{}", image.width, image.height);

        let expected = image.row_bytes() * image.height;
        if image.pixels.len() != expected {
            return Err(ConversionError::EncodeError(format!(
                "pixel buffer holds {} bytes, {}x{} RGB needs {}",
                image.pixels.len(),
                image.width,
                image.height,
                expected
            )));
        }

        let width = u32::try_from(image.width)
            .map_err(|_| ConversionError::InvalidDimensions(image.width, image.height))?;
        let height = u32::try_from(image.height)
            .map_err(|_| ConversionError::InvalidDimensions(image.width, image.height))?;

        let mut encoder = png::Encoder::new(output, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(config.compression.into());

        // Rows are already dense, so each scanline is `row_bytes` straight from the buffer
        let mut writer = encoder.write_header().map_err(encode_error)?;
        writer.write_image_data(&image.pixels).map_err(encode_error)?;
        writer.finish().map_err(encode_error)?;

        debug!("PNG encoding complete");
        Ok(())
    }
}
