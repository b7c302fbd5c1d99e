//! libheif implementation of [`CodecBackend`].
//!
//! Bindings are generated by `build.rs` when pkg-config finds libheif, which
//! also enables `cfg(libheif)`. Without it the backend still exists but every
//! decode fails with [`ConversionError::UnsupportedFormat`].

#[cfg(libheif)]
pub use native::LibheifBackend;

#[cfg(not(libheif))]
pub use fallback::LibheifBackend;

#[cfg(libheif)]
mod native {
    use std::ffi::{CStr, CString, c_int};
    use std::path::Path;
    use std::ptr::{self, NonNull};

    use tracing::debug;

    use crate::image_pipeline::common::error::{ConversionError, Result};
    use crate::image_pipeline::heif::backend::{CodecBackend, Plane};

    #[allow(non_upper_case_globals)]
    #[allow(non_camel_case_types)]
    #[allow(non_snake_case)]
    #[allow(dead_code)]
    mod ffi {
        include!(concat!(env!("OUT_DIR"), "/heif_bindings.rs"));
    }

    /// HEIC codec backed by the system libheif.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LibheifBackend;

    /// Converts a libheif status into a `Result`, keeping the codec's message.
    fn check(error: ffi::heif_error) -> std::result::Result<(), String> {
        if error.code == ffi::heif_error_Ok {
            return Ok(());
        }
        let message = if error.message.is_null() {
            format!("libheif error code {}", error.code)
        } else {
            // SAFETY: libheif messages are static NUL-terminated strings
            unsafe { CStr::from_ptr(error.message) }
                .to_string_lossy()
                .into_owned()
        };
        Err(message)
    }

    impl CodecBackend for LibheifBackend {
        type Context = NonNull<ffi::heif_context>;
        type Handle = NonNull<ffi::heif_image_handle>;
        type Image = NonNull<ffi::heif_image>;

        fn alloc_context(&self) -> Result<Self::Context> {
            // SAFETY: no preconditions, a null return signals failure
            NonNull::new(unsafe { ffi::heif_context_alloc() })
                .ok_or_else(|| ConversionError::AllocationError("HEIF context".to_string()))
        }

        fn read_from_file(&self, context: &Self::Context, path: &Path) -> Result<()> {
            let c_path = CString::new(path.as_os_str().as_encoded_bytes()).map_err(|_| {
                ConversionError::InputReadError(format!("{}: path contains NUL", path.display()))
            })?;

            debug!("Reading HEIF container {}", path.display());

            // SAFETY: context is live and c_path outlives the call
            let error = unsafe {
                ffi::heif_context_read_from_file(context.as_ptr(), c_path.as_ptr(), ptr::null())
            };
            check(error).map_err(|message| {
                ConversionError::DecodeError(format!("could not read HEIC file: {}", message))
            })
        }

        fn primary_image_handle(&self, context: &Self::Context) -> Result<Self::Handle> {
            let mut handle = ptr::null_mut();
            // SAFETY: context is live, handle is a valid out-pointer
            let error =
                unsafe { ffi::heif_context_get_primary_image_handle(context.as_ptr(), &mut handle) };
            check(error).map_err(|message| {
                ConversionError::DecodeError(format!("could not get image handle: {}", message))
            })?;
            NonNull::new(handle).ok_or_else(|| {
                ConversionError::DecodeError("container has no primary image".to_string())
            })
        }

        fn decode_interleaved_rgb(&self, handle: &Self::Handle) -> Result<Self::Image> {
            let mut image = ptr::null_mut();
            // SAFETY: handle is live, image is a valid out-pointer
            let error = unsafe {
                ffi::heif_decode_image(
                    handle.as_ptr(),
                    &mut image,
                    ffi::heif_colorspace_RGB,
                    ffi::heif_chroma_interleaved_RGB,
                    ptr::null(),
                )
            };
            check(error).map_err(|message| {
                ConversionError::DecodeError(format!("could not decode image: {}", message))
            })?;
            NonNull::new(image).ok_or_else(|| {
                ConversionError::DecodeError("decoder returned no image".to_string())
            })
        }

        fn interleaved_plane<'i>(&self, image: &'i Self::Image) -> Result<Plane<'i>> {
            let img = image.as_ptr();
            let channel = ffi::heif_channel_interleaved;

            let mut stride: c_int = 0;
            // SAFETY: img is live for 'i, stride is a valid out-pointer
            let (width, height, data) = unsafe {
                (
                    ffi::heif_image_get_width(img, channel),
                    ffi::heif_image_get_height(img, channel),
                    ffi::heif_image_get_plane_readonly(img, channel, &mut stride),
                )
            };

            if data.is_null() {
                return Err(ConversionError::DecodeError(
                    "decoded image has no interleaved plane".to_string(),
                ));
            }

            let (width, height, stride) = match (
                usize::try_from(width),
                usize::try_from(height),
                usize::try_from(stride),
            ) {
                (Ok(w), Ok(h), Ok(s)) if w > 0 && h > 0 && s > 0 => (w, h, s),
                _ => {
                    return Err(ConversionError::InvalidDimensions(
                        width.max(0) as usize,
                        height.max(0) as usize,
                    ));
                }
            };

            // SAFETY: libheif allocates `stride` bytes for each of `height` rows
            // and keeps them alive until the image is released, which the
            // 'i borrow on `image` rules out while this slice exists.
            let data = unsafe { std::slice::from_raw_parts(data, stride * height) };

            Ok(Plane {
                data,
                stride,
                width,
                height,
            })
        }

        fn free_context(&self, context: Self::Context) {
            // SAFETY: context came from heif_context_alloc and is freed once
            unsafe { ffi::heif_context_free(context.as_ptr()) }
        }

        fn release_handle(&self, handle: Self::Handle) {
            // SAFETY: handle came from libheif and is released once
            unsafe { ffi::heif_image_handle_release(handle.as_ptr()) }
        }

        fn release_image(&self, image: Self::Image) {
            // SAFETY: image came from heif_decode_image and is released once
            unsafe { ffi::heif_image_release(image.as_ptr()) }
        }
    }
}

#[cfg(not(libheif))]
mod fallback {
    use std::convert::Infallible;
    use std::path::Path;

    use crate::image_pipeline::common::error::{ConversionError, Result};
    use crate::image_pipeline::heif::backend::{CodecBackend, Plane};

    /// Stand-in used when the crate was built without libheif.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LibheifBackend;

    impl CodecBackend for LibheifBackend {
        type Context = Infallible;
        type Handle = Infallible;
        type Image = Infallible;

        fn alloc_context(&self) -> Result<Self::Context> {
            Err(ConversionError::UnsupportedFormat(
                "HEIC decoding requires libheif, which was not found at build time".to_string(),
            ))
        }

        fn read_from_file(&self, context: &Self::Context, _path: &Path) -> Result<()> {
            match *context {}
        }

        fn primary_image_handle(&self, context: &Self::Context) -> Result<Self::Handle> {
            match *context {}
        }

        fn decode_interleaved_rgb(&self, handle: &Self::Handle) -> Result<Self::Image> {
            match *handle {}
        }

        fn interleaved_plane<'i>(&self, image: &'i Self::Image) -> Result<Plane<'i>> {
            match *image {}
        }

        fn free_context(&self, context: Self::Context) {
            match context {}
        }

        fn release_handle(&self, handle: Self::Handle) {
            match handle {}
        }

        fn release_image(&self, image: Self::Image) {
            match image {}
        }
    }
}
