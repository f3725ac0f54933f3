//! Loader option sets.
//!
//! Every loader also accepts the generic foreign-load arguments (`memory`,
//! `access`, `fail-on`, `revalidate`), which come last in declaration order.

use serde::{Deserialize, Serialize};

use super::{Access, Domain, FailOn};

const PAGE: Domain = Domain::Int { min: 0, max: 100_000 };
const N_PAGES: Domain = Domain::Int { min: -1, max: 100_000 };
const ACCESS: Domain = Domain::Enum(Access::NICKS);
const FAIL_ON: Domain = Domain::Enum(FailOn::NICKS);

option_set! {
    /// Arguments shared by every loader. Usable with any file type.
    pub struct LoadOptions => "foreignload" {
        /// Force the decoded image into memory
        memory: bool => "memory", Domain::Bool;
        access: Access => "access", ACCESS;
        fail_on: FailOn => "fail-on", FAIL_ON;
        /// Skip the operation cache and always reload
        revalidate: bool => "revalidate", Domain::Bool;
    }
}

option_set! {
    /// `heifload`: HEIF and AVIF images.
    pub struct HeifLoadOptions => "heifload" {
        /// First page to load
        page: i32 => "page", PAGE;
        /// Number of pages to load, -1 for all
        n: i32 => "n", N_PAGES;
        /// Load the embedded thumbnail instead of the primary image
        thumbnail: bool => "thumbnail", Domain::Bool;
        /// Remove libheif's security limits
        unlimited: bool => "unlimited", Domain::Bool;
        memory: bool => "memory", Domain::Bool;
        access: Access => "access", ACCESS;
        fail_on: FailOn => "fail-on", FAIL_ON;
        revalidate: bool => "revalidate", Domain::Bool;
    }
}

option_set! {
    /// `jpegload`
    pub struct JpegLoadOptions => "jpegload" {
        /// Shrink factor applied during decode
        shrink: i32 => "shrink", Domain::Int { min: 1, max: 16 };
        /// Rotate upright using the EXIF orientation tag
        autorotate: bool => "autorotate", Domain::Bool;
        unlimited: bool => "unlimited", Domain::Bool;
        memory: bool => "memory", Domain::Bool;
        access: Access => "access", ACCESS;
        fail_on: FailOn => "fail-on", FAIL_ON;
        revalidate: bool => "revalidate", Domain::Bool;
    }
}

option_set! {
    /// `pngload`
    pub struct PngLoadOptions => "pngload" {
        unlimited: bool => "unlimited", Domain::Bool;
        memory: bool => "memory", Domain::Bool;
        access: Access => "access", ACCESS;
        fail_on: FailOn => "fail-on", FAIL_ON;
        revalidate: bool => "revalidate", Domain::Bool;
    }
}

option_set! {
    /// `webpload`
    pub struct WebpLoadOptions => "webpload" {
        page: i32 => "page", PAGE;
        n: i32 => "n", N_PAGES;
        /// Scale factor on load
        scale: f64 => "scale", Domain::Double { min: 0.0, max: 1024.0 };
        memory: bool => "memory", Domain::Bool;
        access: Access => "access", ACCESS;
        fail_on: FailOn => "fail-on", FAIL_ON;
        revalidate: bool => "revalidate", Domain::Bool;
    }
}

option_set! {
    /// `svgload`
    pub struct SvgLoadOptions => "svgload" {
        /// Render at this DPI
        dpi: f64 => "dpi", Domain::Double { min: 0.001, max: 100_000.0 };
        scale: f64 => "scale", Domain::Double { min: 0.001, max: 100_000.0 };
        /// Allow SVGs of any size
        unlimited: bool => "unlimited", Domain::Bool;
        memory: bool => "memory", Domain::Bool;
        access: Access => "access", ACCESS;
        fail_on: FailOn => "fail-on", FAIL_ON;
        revalidate: bool => "revalidate", Domain::Bool;
    }
}
