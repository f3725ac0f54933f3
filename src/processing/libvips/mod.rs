//! Direct calls into libvips.
//!
//! # Architecture
//!
//! - [`sys`]: hand-declared C entry points.
//! - [`varargs`]: NULL-terminated variadic call adapter.
//! - [`Image`]: owned image handle built on the two above.

mod image;
pub mod sys;
pub mod varargs;

pub use image::Image;
