use image::GrayImage;

/// Pixels brighter than this become white in the binarised retry
pub const DEFAULT_THRESHOLD: u8 = 128;

pub trait QrDetector {
    /// Returns the payload of the first QR code found, `None` when there is none.
    fn detect_and_decode(&self, image: &GrayImage) -> Option<String>;

    /// Same as [`detect_and_decode`](Self::detect_and_decode) on a black and
    /// white copy: pixels above `threshold` become white, the rest black.
    fn detect_and_decode_binarized(&self, image: &GrayImage, threshold: u8) -> Option<String> {
        let mut binary = image.clone();
        for pixel in binary.pixels_mut() {
            pixel.0[0] = if pixel.0[0] > threshold { u8::MAX } else { 0 };
        }
        self.detect_and_decode(&binary)
    }
}
