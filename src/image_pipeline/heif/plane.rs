use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::heif::types::DecodedImage;

/// Copies a strided interleaved RGB plane into a dense buffer.
///
/// Reads `width * 3` bytes from the start of each of the `height` rows, rows
/// being `stride` bytes apart. Any padding past `width * 3` is left behind, so
/// the result is exactly `width * height * 3` bytes.
///
/// # Arguments
///
/// * `src` - Plane bytes, starting at the first pixel of row 0
/// * `stride` - Bytes between the starts of consecutive rows
/// * `width` - Pixels per row
/// * `height` - Number of rows
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - Dense row-major RGB pixels
/// * `Err(ConversionError)` - Zero-sized image, a stride shorter than a row,
///   or a source too short for the requested geometry
pub fn copy_plane(src: &[u8], stride: usize, width: usize, height: usize) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(ConversionError::InvalidDimensions(width, height));
    }

    let row_bytes = width
        .checked_mul(DecodedImage::CHANNELS)
        .ok_or(ConversionError::InvalidDimensions(width, height))?;

    if stride < row_bytes {
        return Err(ConversionError::InvalidPlane(format!(
            "stride {} is shorter than a row of {} bytes",
            stride, row_bytes
        )));
    }

    // The last row only needs its pixels, not its padding
    let required = (height - 1)
        .checked_mul(stride)
        .and_then(|n| n.checked_add(row_bytes))
        .ok_or(ConversionError::InvalidDimensions(width, height))?;

    if src.len() < required {
        return Err(ConversionError::InvalidPlane(format!(
            "plane holds {} bytes, {}x{} with stride {} needs {}",
            src.len(),
            width,
            height,
            stride,
            required
        )));
    }

    let mut pixels = Vec::with_capacity(row_bytes * height);
    for row in src.chunks(stride).take(height) {
        pixels.extend_from_slice(&row[..row_bytes]);
    }

    Ok(pixels)
}
