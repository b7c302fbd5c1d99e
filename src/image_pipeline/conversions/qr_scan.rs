use std::path::Path;

use tracing::{debug, info, instrument};

use crate::image_pipeline::{
    common::error::Result,
    heif::{HeicImageReader, HeifBridge},
    qr::{DEFAULT_THRESHOLD, QrDetector, Region, RqrrDetector, load_luma},
};

pub struct QrScanPipeline<R: HeicImageReader, D: QrDetector> {
    reader: R,
    detector: D,
}

impl QrScanPipeline<HeifBridge, RqrrDetector> {
    pub fn new() -> Self {
        Self {
            reader: HeifBridge::new(),
            detector: RqrrDetector,
        }
    }
}

impl Default for QrScanPipeline<HeifBridge, RqrrDetector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: HeicImageReader, D: QrDetector> QrScanPipeline<R, D> {
    pub fn with_custom(reader: R, detector: D) -> Self {
        Self { reader, detector }
    }

    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Decodes the first QR code in the image at `path`.
    ///
    /// `Ok(None)` means the image loaded but holds no readable QR code.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn scan_file<P: AsRef<Path>>(&self, path: P) -> Result<Option<String>> {
        let luma = {
            let _span = tracing::info_span!("load_image").entered();
            load_luma(path.as_ref(), &self.reader)?
        };

        let payload = {
            let _span = tracing::info_span!("detect_qr",
                width = luma.width(),
                height = luma.height()
            ).entered();
            self.detector.detect_and_decode(&luma)
        };

        info!(found = payload.is_some(), "QR scan complete");
        Ok(payload)
    }

    /// Decodes the first QR code inside `region` of the image at `path`.
    ///
    /// The region is clamped to the image. When the greyscale crop yields
    /// nothing, one retry runs on a copy binarised at [`DEFAULT_THRESHOLD`].
    #[instrument(skip(self, path, region), fields(path = %path.as_ref().display(), region = %region))]
    pub fn scan_region<P: AsRef<Path>>(&self, path: P, region: Region) -> Result<Option<String>> {
        let luma = {
            let _span = tracing::info_span!("load_image").entered();
            load_luma(path.as_ref(), &self.reader)?
        };
        debug!(
            "Image size: {}x{}, selection {}",
            luma.width(),
            luma.height(),
            region
        );

        let cropped = region.crop(&luma)?;

        let payload = {
            let _span = tracing::info_span!("detect_qr",
                width = cropped.width(),
                height = cropped.height()
            ).entered();
            self.detector.detect_and_decode(&cropped).or_else(|| {
                debug!("No QR code in greyscale crop, retrying binarised");
                self.detector
                    .detect_and_decode_binarized(&cropped, DEFAULT_THRESHOLD)
            })
        };

        info!(found = payload.is_some(), "QR region scan complete");
        Ok(payload)
    }
}
