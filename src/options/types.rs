//! Mirrors of the libvips GEnum and GFlags types used by option sets.
//!
//! Values and nicks match the libvips 8.15 type registrations.

use serde::{Deserialize, Serialize};

vips_enum! {
    /// `VipsAccess`: how the loader will be read.
    pub enum Access {
        Random = 0 => "random",
        Sequential = 1 => "sequential",
        SequentialUnbuffered = 2 => "sequential-unbuffered",
    }
}

vips_enum! {
    /// `VipsFailOn`: the error level at which a load gives up.
    pub enum FailOn {
        None = 0 => "none",
        Truncated = 1 => "truncated",
        Error = 2 => "error",
        Warning = 3 => "warning",
    }
}

vips_enum! {
    /// `VipsForeignHeifCompression`
    pub enum HeifCompression {
        Hevc = 1 => "hevc",
        Avc = 2 => "avc",
        Jpeg = 3 => "jpeg",
        Av1 = 4 => "av1",
    }
}

vips_enum! {
    /// `VipsForeignHeifEncoder`: which libheif plugin performs the encode.
    pub enum HeifEncoder {
        Auto = 0 => "auto",
        Aom = 1 => "aom",
        Rav1e = 2 => "rav1e",
        Svt = 3 => "svt",
        X265 = 4 => "x265",
    }
}

vips_enum! {
    /// `VipsForeignSubsample`: chroma subsampling mode.
    pub enum ForeignSubsample {
        Auto = 0 => "auto",
        On = 1 => "on",
        Off = 2 => "off",
    }
}

vips_enum! {
    /// `VipsForeignWebpPreset`
    pub enum WebpPreset {
        Default = 0 => "default",
        Picture = 1 => "picture",
        Photo = 2 => "photo",
        Drawing = 3 => "drawing",
        Icon = 4 => "icon",
        Text = 5 => "text",
    }
}

vips_flags! {
    /// `VipsForeignKeep`: which metadata a saver writes.
    pub struct ForeignKeep {
        const NONE = 0 => "none";
        const EXIF = 1 => "exif";
        const XMP = 2 => "xmp";
        const IPTC = 4 => "iptc";
        const ICC = 8 => "icc";
        const OTHER = 16 => "other";
        const ALL = 31 => "all";
    }
}

vips_flags! {
    /// `VipsForeignPngFilter`: row filters the PNG encoder may try.
    ///
    /// Unlike most flag types, `none` is a real bit here.
    pub struct ForeignPngFilter {
        const NONE = 8 => "none";
        const SUB = 16 => "sub";
        const UP = 32 => "up";
        const AVG = 64 => "avg";
        const PAETH = 128 => "paeth";
        const ALL = 248 => "all";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_nicks_follow_gobject_names() {
        assert_eq!(Access::SequentialUnbuffered.nick(), "sequential-unbuffered");
        assert_eq!(FailOn::Warning as i32, 3);
        assert_eq!(HeifCompression::Av1.to_string(), "av1");
    }

    #[test]
    fn enums_deserialise_from_nicks() {
        let access: Access = serde_json::from_str(r#""sequential-unbuffered""#).unwrap();
        assert_eq!(access, Access::SequentialUnbuffered);
        assert!(serde_json::from_str::<Access>(r#""SequentialUnbuffered""#).is_err());
    }

    #[test]
    fn png_filter_none_is_a_bit() {
        let filter = ForeignPngFilter::NONE | ForeignPngFilter::PAETH;
        assert_eq!(filter.to_string(), "none:paeth");
        assert!(filter.contains(ForeignPngFilter::PAETH));
        assert!(!filter.contains(ForeignPngFilter::SUB));
    }

    #[test]
    fn composite_flags_expand_to_single_bits() {
        assert_eq!(ForeignPngFilter::ALL.to_string(), "none:sub:up:avg:paeth");
        assert_eq!(ForeignKeep::from_bits_retain(0b101).to_string(), "exif:iptc");
    }
}
