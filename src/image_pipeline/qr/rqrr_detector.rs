//! QR detector implementation using the rqrr library.

use image::GrayImage;
use tracing::debug;

use crate::image_pipeline::qr::detector::QrDetector;

/// Finds grids with rqrr and decodes the first one.
///
/// Only the first grid is considered; bounding-box geometry is not checked.
pub struct RqrrDetector;

impl QrDetector for RqrrDetector {
    fn detect_and_decode(&self, image: &GrayImage) -> Option<String> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        if width == 0 || height == 0 {
            return None;
        }

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
            image.get_pixel(x as u32, y as u32).0[0]
        });
        let grids = prepared.detect_grids();
        debug!("Found {} candidate QR grid(s)", grids.len());

        let grid = grids.first()?;
        match grid.decode() {
            Ok((_meta, content)) if !content.is_empty() => Some(content),
            Ok(_) => None,
            Err(e) => {
                debug!("QR grid failed to decode: {:?}", e);
                None
            }
        }
    }
}
