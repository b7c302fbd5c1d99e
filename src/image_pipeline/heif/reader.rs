use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::heif::types::DecodedImage;

pub trait HeicImageReader {
    fn read_heic(&self, path: &Path) -> Result<DecodedImage>;
}
