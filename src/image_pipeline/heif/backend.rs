//! Native codec seam used by the HEIC bridge.

use std::path::Path;

use crate::image_pipeline::common::error::Result;

/// Borrowed view of the interleaved RGB plane of a decoded codec image.
///
/// The borrow ties the view to the codec image it came from, so the bytes
/// cannot be used after that image is released.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'i> {
    pub data: &'i [u8],
    /// Bytes from the start of one row to the start of the next
    pub stride: usize,
    pub width: usize,
    pub height: usize,
}

/// The native operations the bridge needs, one per decode step.
///
/// Every `Context`, `Handle` and `Image` handed out must be given back to the
/// matching release method exactly once. [`HeifBridge`](super::HeifBridge)
/// does this through [`NativeGuard`](super::NativeGuard).
pub trait CodecBackend {
    type Context;
    type Handle;
    type Image;

    fn alloc_context(&self) -> Result<Self::Context>;
    fn read_from_file(&self, context: &Self::Context, path: &Path) -> Result<()>;
    fn primary_image_handle(&self, context: &Self::Context) -> Result<Self::Handle>;
    /// Decode into RGB colorspace with a single interleaved RGB plane.
    fn decode_interleaved_rgb(&self, handle: &Self::Handle) -> Result<Self::Image>;
    fn interleaved_plane<'i>(&self, image: &'i Self::Image) -> Result<Plane<'i>>;

    fn free_context(&self, context: Self::Context);
    fn release_handle(&self, handle: Self::Handle);
    fn release_image(&self, image: Self::Image);
}
