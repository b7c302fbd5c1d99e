//! HEIC/HEIF decoding module
//!
//! This module bridges libheif into a dense RGB buffer. Native codec objects
//! never leave [`HeifBridge::decode`]: each one is held by a [`NativeGuard`]
//! and released on every exit path.

mod backend;
mod bridge;
mod guard;
mod libheif_backend;
mod plane;
mod reader;
pub mod types;


pub use backend::{CodecBackend, Plane};
pub use bridge::HeifBridge;
pub use guard::NativeGuard;
pub use libheif_backend::LibheifBackend;
pub use plane::copy_plane;
pub use reader::HeicImageReader;
pub use types::DecodedImage;
