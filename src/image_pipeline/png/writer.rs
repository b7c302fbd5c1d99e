use std::io::Write;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::heif::types::DecodedImage;
use crate::image_pipeline::png::types::ConversionConfig;

pub trait PngWriter {
    fn write_png(
        &self,
        image: &DecodedImage,
        output: &mut dyn Write,
        config: &ConversionConfig,
    ) -> Result<()>;
}
