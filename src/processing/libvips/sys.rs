//! The libvips and GObject entry points this crate calls, taken from the
//! bindgen output shipped with libvips-rs.
//!
//! The variadic functions take their optional arguments as `name, value`
//! pairs ending in a NULL; call them through
//! [`VarArgs`](super::varargs::VarArgs) so the sentinel is never forgotten.

use std::ffi::CStr;

pub use ::libvips::bindings::{
    VipsImage, g_object_unref, vips_avg, vips_error_buffer, vips_error_clear,
    vips_image_get_bands, vips_image_get_height, vips_image_get_width,
    vips_image_new_from_file, vips_image_write_to_file,
};

/// Returns the accumulated libvips error text and clears the buffer.
pub fn take_error() -> String {
    // SAFETY: vips_error_buffer returns a pointer to libvips' static,
    // NUL-terminated buffer; it is copied out before being cleared.
    unsafe {
        let buffer = vips_error_buffer();
        let message = if buffer.is_null() {
            String::new()
        } else {
            CStr::from_ptr(buffer).to_string_lossy().trim_end().to_string()
        };
        vips_error_clear();
        message
    }
}
