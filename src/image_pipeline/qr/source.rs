//! Image loading for QR scans
//!
//! HEIC/HEIF files go through the HEIC bridge, everything else through the
//! `image` crate. Either way the detector receives a luma image.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use image::{DynamicImage, GrayImage};
use tracing::debug;

use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::heif::HeicImageReader;

/// How an input file is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// `.heic` / `.heif`, any letter case
    Heif,
    /// Anything the `image` crate can open
    Raster,
}

impl ImageSource {
    pub fn classify(path: &Path) -> Self {
        // Suffix after the last dot of the file name, so `.heic` itself counts
        let is_heif = path
            .file_name()
            .map(|name| name.as_encoded_bytes())
            .and_then(|name| {
                let dot = name.iter().rposition(|&b| b == b'.')?;
                Some(&name[dot + 1..])
            })
            .is_some_and(|ext| ext.eq_ignore_ascii_case(b"heic") || ext.eq_ignore_ascii_case(b"heif"));

        if is_heif { Self::Heif } else { Self::Raster }
    }
}

/// Loads `path` as a luma image, routing HEIC/HEIF through `reader`.
pub fn load_luma<R: HeicImageReader>(path: &Path, reader: &R) -> Result<GrayImage> {
    let source = ImageSource::classify(path);
    debug!("Loading {} as {:?}", path.display(), source);

    let image = match source {
        ImageSource::Heif => {
            let decoded = reader.read_heic(path)?;
            DynamicImage::ImageRgb8(decoded.into_rgb_image()?)
        }
        ImageSource::Raster => image::open(path).map_err(|e| {
            ConversionError::ImageLoadError(format!(
                "Could not read the image file {}: {}",
                path.display(),
                e
            ))
        })?,
    };

    if image.width() == 0 || image.height() == 0 {
        return Err(ConversionError::ImageLoadError(
            "Could not read the image file".to_string(),
        ));
    }

    Ok(image.to_luma8())
}

/// Pixel rectangle between two corners, as typed on the command line (`x1,y1,x2,y2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Region {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Orders the corners and clamps them to a `width` x `height` image.
    ///
    /// Returns `(x, y, width, height)` of the crop.
    pub fn clamp_to(&self, width: u32, height: u32) -> Result<(u32, u32, u32, u32)> {
        let left = self.x1.min(self.x2).min(width);
        let right = self.x1.max(self.x2).min(width);
        let top = self.y1.min(self.y2).min(height);
        let bottom = self.y1.max(self.y2).min(height);

        if right == left || bottom == top {
            return Err(ConversionError::InvalidRegion(format!(
                "{} is empty inside a {}x{} image",
                self, width, height
            )));
        }

        Ok((left, top, right - left, bottom - top))
    }

    pub fn crop(&self, image: &GrayImage) -> Result<GrayImage> {
        let (x, y, w, h) = self.clamp_to(image.width(), image.height())?;
        Ok(image::imageops::crop_imm(image, x, y, w, h).to_image())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x1, self.y1, self.x2, self.y2)
    }
}

impl FromStr for Region {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        let coords = s
            .split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ConversionError::InvalidRegion(format!("{:?}: {}", s, e)))?;

        match coords[..] {
            [x1, y1, x2, y2] => Ok(Self::new(x1, y1, x2, y2)),
            _ => Err(ConversionError::InvalidRegion(format!(
                "{:?}: expected x1,y1,x2,y2",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_heif_extensions_any_case() {
        for name in ["a.heic", "a.HEIC", "b.heif", "dir.x/c.HeIf", ".heic", "dir/.HEIF"] {
            assert_eq!(ImageSource::classify(Path::new(name)), ImageSource::Heif, "{}", name);
        }
    }

    #[test]
    fn test_classify_everything_else_as_raster() {
        for name in ["a.png", "a.jpg", "heic", "a.heic.png", "noext", "a.heics"] {
            assert_eq!(ImageSource::classify(Path::new(name)), ImageSource::Raster, "{}", name);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_non_utf8_heic_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"caf\xe9.HEIC"));
        assert_eq!(ImageSource::classify(path), ImageSource::Heif);
    }

    #[test]
    fn test_unreadable_raster_reports_read_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        match load_luma(&path, &crate::image_pipeline::HeifBridge::new()) {
            Err(ConversionError::ImageLoadError(message)) => {
                assert!(message.starts_with("Could not read the image file"), "{}", message);
                assert!(message.contains("broken.png"), "{}", message);
            }
            other => panic!("expected image load error, got {:?}", other),
        }
    }

    #[test]
    fn test_region_parses() {
        let region: Region = "10, 20,30,40".parse().unwrap();
        assert_eq!(region, Region::new(10, 20, 30, 40));
        assert_eq!(region.to_string(), "10,20,30,40");
    }

    #[test]
    fn test_region_rejects_bad_input() {
        assert!("1,2,3".parse::<Region>().is_err());
        assert!("1,2,3,4,5".parse::<Region>().is_err());
        assert!("a,b,c,d".parse::<Region>().is_err());
        assert!("-1,0,5,5".parse::<Region>().is_err());
    }

    #[test]
    fn test_region_orders_and_clamps_corners() {
        let region = Region::new(80, 90, 10, 5);
        assert_eq!(region.clamp_to(50, 60).unwrap(), (10, 5, 40, 55));
    }

    #[test]
    fn test_region_outside_image_is_empty() {
        let region = Region::new(200, 200, 300, 300);
        assert!(matches!(
            region.clamp_to(100, 100),
            Err(ConversionError::InvalidRegion(_))
        ));
    }

    #[test]
    fn test_crop_takes_requested_pixels() {
        let image = GrayImage::from_fn(8, 8, |x, y| image::Luma([(y * 8 + x) as u8]));
        let cropped = Region::new(2, 3, 5, 4).crop(&image).unwrap();

        assert_eq!(cropped.dimensions(), (3, 1));
        assert_eq!(cropped.as_raw(), &vec![26, 27, 28]);
    }
}
