//! Saver option sets.
//!
//! Savers end with the generic foreign-save arguments (`keep`, `background`,
//! `page-height`, `profile`). `background` is an array of doubles, which has
//! no file-name encoding; setting it makes encoding fail.

use serde::{Deserialize, Serialize};

use super::{
    Domain, ForeignKeep, ForeignPngFilter, ForeignSubsample, HeifCompression, HeifEncoder,
    MAX_COORD, WebpPreset,
};

const QUALITY: Domain = Domain::Int { min: 1, max: 100 };
const KEEP: Domain = Domain::Flags(ForeignKeep::NICKS);
const PAGE_HEIGHT: Domain = Domain::Int { min: 0, max: MAX_COORD };
const SUBSAMPLE: Domain = Domain::Enum(ForeignSubsample::NICKS);

option_set! {
    /// `heifsave`: HEIF and AVIF output.
    pub struct HeifSaveOptions => "heifsave" {
        /// Quality factor
        q: i32 => "Q", QUALITY;
        /// Bits per pixel
        bitdepth: i32 => "bitdepth", Domain::Int { min: 1, max: 16 };
        lossless: bool => "lossless", Domain::Bool;
        compression: HeifCompression => "compression", Domain::Enum(HeifCompression::NICKS);
        /// CPU effort, 0 is fastest
        effort: i32 => "effort", Domain::Int { min: 0, max: 9 };
        subsample_mode: ForeignSubsample => "subsample-mode", SUBSAMPLE;
        encoder: HeifEncoder => "encoder", Domain::Enum(HeifEncoder::NICKS);
        keep: ForeignKeep => "keep", KEEP;
        background: Vec<f64> => "background", Domain::Unsupported;
        page_height: i32 => "page-height", PAGE_HEIGHT;
        /// ICC profile file name
        profile: String => "profile", Domain::Str;
    }
}

option_set! {
    /// `jpegsave`
    pub struct JpegSaveOptions => "jpegsave" {
        q: i32 => "Q", QUALITY;
        optimize_coding: bool => "optimize-coding", Domain::Bool;
        interlace: bool => "interlace", Domain::Bool;
        trellis_quant: bool => "trellis-quant", Domain::Bool;
        overshoot_deringing: bool => "overshoot-deringing", Domain::Bool;
        optimize_scans: bool => "optimize-scans", Domain::Bool;
        /// Quantisation table preset, 3 is the mozjpeg table
        quant_table: i32 => "quant-table", Domain::Int { min: 0, max: 8 };
        subsample_mode: ForeignSubsample => "subsample-mode", SUBSAMPLE;
        restart_interval: i32 => "restart-interval", Domain::Int { min: 0, max: 10_000 };
        keep: ForeignKeep => "keep", KEEP;
        background: Vec<f64> => "background", Domain::Unsupported;
        page_height: i32 => "page-height", PAGE_HEIGHT;
        profile: String => "profile", Domain::Str;
    }
}

option_set! {
    /// `pngsave`
    pub struct PngSaveOptions => "pngsave" {
        /// zlib compression level
        compression: i32 => "compression", Domain::Int { min: 0, max: 9 };
        interlace: bool => "interlace", Domain::Bool;
        filter: ForeignPngFilter => "filter", Domain::Flags(ForeignPngFilter::NICKS);
        /// Quantise to an 8-bit palette
        palette: bool => "palette", Domain::Bool;
        q: i32 => "Q", Domain::Int { min: 0, max: 100 };
        dither: f64 => "dither", Domain::Double { min: 0.0, max: 1.0 };
        bitdepth: i32 => "bitdepth", Domain::Int { min: 1, max: 16 };
        effort: i32 => "effort", Domain::Int { min: 1, max: 10 };
        keep: ForeignKeep => "keep", KEEP;
        background: Vec<f64> => "background", Domain::Unsupported;
        page_height: i32 => "page-height", PAGE_HEIGHT;
        profile: String => "profile", Domain::Str;
    }
}

option_set! {
    /// `webpsave`
    pub struct WebpSaveOptions => "webpsave" {
        q: i32 => "Q", Domain::Int { min: 0, max: 100 };
        lossless: bool => "lossless", Domain::Bool;
        preset: WebpPreset => "preset", Domain::Enum(WebpPreset::NICKS);
        smart_subsample: bool => "smart-subsample", Domain::Bool;
        near_lossless: bool => "near-lossless", Domain::Bool;
        alpha_q: i32 => "alpha-q", Domain::Int { min: 0, max: 100 };
        min_size: bool => "min-size", Domain::Bool;
        /// Minimum frames between keyframes
        kmin: i32 => "kmin", Domain::Int { min: 0, max: i32::MAX as i64 - 1 };
        /// Maximum frames between keyframes
        kmax: i32 => "kmax", Domain::Int { min: 0, max: i32::MAX as i64 };
        effort: i32 => "effort", Domain::Int { min: 0, max: 6 };
        /// Allow mixed lossy and lossless frames
        mixed: bool => "mixed", Domain::Bool;
        keep: ForeignKeep => "keep", KEEP;
        background: Vec<f64> => "background", Domain::Unsupported;
        page_height: i32 => "page-height", PAGE_HEIGHT;
        profile: String => "profile", Domain::Str;
    }
}
