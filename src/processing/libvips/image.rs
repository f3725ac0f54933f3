//! Owned handle to one libvips image.

use std::ffi::c_double;
use std::ptr::NonNull;

use tracing::{debug, warn};

use crate::options::Options;
use crate::utils::{VipsError, VipsResult};

use super::sys;
use super::varargs::VarArgs;

/// A reference-counted `VipsImage` owned by this handle.
///
/// The reference is dropped exactly once, on [`Image::release`] or when the
/// handle goes out of scope. The handle is neither `Send` nor `Sync`.
/// [`Runtime`](crate::Runtime) must be started before opening images.
#[derive(Debug)]
pub struct Image {
    ptr: NonNull<sys::VipsImage>,
}

impl Image {
    /// Opens `path` with the optional arguments in `options`.
    ///
    /// Returns `Ok(None)` when libvips cannot open the file: a missing path,
    /// an unsupported format, a decode failure or an option the loader does
    /// not know. The libvips error text is logged and cleared.
    ///
    /// # Errors
    ///
    /// [`VipsError::Encode`] when `options` cannot be encoded; libvips is not
    /// called in that case.
    pub fn open(path: &str, options: &Options) -> VipsResult<Option<Self>> {
        let name = options.encode(path)?;
        debug!("Opening {:?} ({})", name, options.operation());

        // SAFETY: `name` is a valid C string that outlives the call and the
        // argument list is NULL-terminated by `invoke1`.
        let ptr = unsafe { ().invoke1(sys::vips_image_new_from_file, name.as_ptr()) };

        let Some(ptr) = NonNull::new(ptr) else {
            warn!("libvips could not open '{}': {}", path, sys::take_error());
            return Ok(None);
        };

        let image = Self { ptr };
        debug!(
            "Loaded '{}': {}×{}, {} bands",
            path,
            image.width(),
            image.height(),
            image.bands()
        );
        Ok(Some(image))
    }

    /// Mean of all pixels across all bands.
    pub fn average(&self) -> VipsResult<f64> {
        let mut out: c_double = 0.0;

        // SAFETY: the image pointer is live for `&self` and `out` is a valid
        // destination for the result.
        let status =
            unsafe { ().invoke2(sys::vips_avg, self.ptr.as_ptr(), &raw mut out) };

        if status != 0 {
            return Err(VipsError::failed_to_compute_average(sys::take_error()));
        }
        Ok(out)
    }

    /// Writes the image to `path`. The saver is picked from the file
    /// extension and receives the optional arguments in `options`.
    pub fn save(&self, path: &str, options: &Options) -> VipsResult<()> {
        let name = options.encode(path)?;
        debug!("Saving {:?} ({})", name, options.operation());

        // SAFETY: as in `open`; the image pointer is live for `&self`.
        let status = unsafe {
            ().invoke2(sys::vips_image_write_to_file, self.ptr.as_ptr(), name.as_ptr())
        };

        if status != 0 {
            return Err(VipsError::failed_to_save(format!(
                "'{path}': {}",
                sys::take_error()
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> i32 {
        // SAFETY: the image pointer is live for `&self`; header reads do
        // not touch pixel data.
        unsafe { sys::vips_image_get_width(self.ptr.as_ptr()) }
    }

    pub fn height(&self) -> i32 {
        // SAFETY: the image pointer is live for `&self`; header reads do
        // not touch pixel data.
        unsafe { sys::vips_image_get_height(self.ptr.as_ptr()) }
    }

    pub fn bands(&self) -> i32 {
        // SAFETY: the image pointer is live for `&self`; header reads do
        // not touch pixel data.
        unsafe { sys::vips_image_get_bands(self.ptr.as_ptr()) }
    }

    /// Drops the libvips reference now instead of at end of scope.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        // SAFETY: the handle owns exactly one reference, taken at open.
        unsafe { sys::g_object_unref(self.ptr.as_ptr().cast()) };
    }
}
