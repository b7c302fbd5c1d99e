//! HEIC to dense RGB bridge.

use std::path::Path;

use tracing::{debug, instrument};

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::heif::backend::CodecBackend;
use crate::image_pipeline::heif::guard::NativeGuard;
use crate::image_pipeline::heif::libheif_backend::LibheifBackend;
use crate::image_pipeline::heif::plane::copy_plane;
use crate::image_pipeline::heif::reader::HeicImageReader;
use crate::image_pipeline::heif::types::DecodedImage;

/// Decodes the primary image of a HEIC/HEIF file into a [`DecodedImage`].
pub struct HeifBridge<B: CodecBackend = LibheifBackend> {
    backend: B,
}

impl HeifBridge<LibheifBackend> {
    pub fn new() -> Self {
        Self {
            backend: LibheifBackend,
        }
    }
}

impl Default for HeifBridge<LibheifBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: CodecBackend> HeifBridge<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Decodes `path` into dense RGB pixels.
    ///
    /// Context, handle and decoded image are each held by a [`NativeGuard`],
    /// so whichever of them were acquired are released, newest first, no
    /// matter which step fails. The returned pixels are a copy and keep no
    /// reference to codec memory.
    ///
    /// # Errors
    ///
    /// * `AllocationError` - The codec context could not be created
    /// * `DecodeError` - Unreadable container, no primary image, decode
    ///   failure, or a missing interleaved plane
    /// * `InvalidDimensions` / `InvalidPlane` - Inconsistent plane geometry
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn decode(&self, path: &Path) -> Result<DecodedImage> {
        let backend = &self.backend;

        let context = NativeGuard::new(backend, backend.alloc_context()?, B::free_context);
        backend.read_from_file(&context, path)?;

        let handle = NativeGuard::new(
            backend,
            backend.primary_image_handle(&context)?,
            B::release_handle,
        );

        let image = NativeGuard::new(
            backend,
            backend.decode_interleaved_rgb(&handle)?,
            B::release_image,
        );

        let plane = backend.interleaved_plane(&image)?;
        debug!(
            width = plane.width,
            height = plane.height,
            stride = plane.stride,
            "Decoded interleaved RGB plane"
        );

        let pixels = copy_plane(plane.data, plane.stride, plane.width, plane.height)?;

        Ok(DecodedImage {
            width: plane.width,
            height: plane.height,
            pixels,
            source_stride: plane.stride,
        })
    }
}

impl<B: CodecBackend> HeicImageReader for HeifBridge<B> {
    fn read_heic(&self, path: &Path) -> Result<DecodedImage> {
        self.decode(path)
    }
}
