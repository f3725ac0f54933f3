//! Typed optional arguments for libvips operations.
//!
//! libvips accepts optional arguments appended to a file name, e.g.
//! `photo.heic[page=3,n=-1,thumbnail=true]`. Each operation's arguments are
//! modelled as an option set: a struct of `Option<T>` fields plus a static
//! descriptor table ([`OptionSet::FIELDS`]) naming each field, its domain and
//! how to read it. The encoder in [`encoder`] walks that table in declaration
//! order, so no reflection is needed.
//!
//! # Layout
//!
//! - [`types`]: GEnum and GFlags mirrors (`Access`, `FailOn`, `ForeignKeep`, ...).
//! - [`load`]: loader option sets.
//! - [`save`]: saver option sets.
//! - [`Options`]: the tagged union callers pass to the image layer.

use std::ffi::CString;
use std::fmt::{self, Write};

use serde::{Deserialize, Serialize};

use crate::utils::EncodeError;

/// Defines an option set struct and its descriptor table.
///
/// Each field is written as `name: Type => "nick", domain;`. Fields are
/// wrapped in `Option`, serialised under their nick, and appear in the
/// table in the order given here.
macro_rules! option_set {
    (
        $(#[$meta:meta])*
        pub struct $name:ident => $operation:literal {
            $(
                $(#[$fmeta:meta])*
                $field:ident: $ty:ty => $nick:literal, $domain:expr;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default, deny_unknown_fields)]
        pub struct $name {
            $(
                $(#[$fmeta])*
                #[serde(rename = $nick, skip_serializing_if = "Option::is_none")]
                pub $field: Option<$ty>,
            )*
        }

        impl $crate::options::OptionSet for $name {
            const OPERATION: &'static str = $operation;
            const FIELDS: &'static [$crate::options::Field<Self>] = &[
                $(
                    $crate::options::Field {
                        name: $nick,
                        domain: $domain,
                        get: |options| options.$field.as_ref().map($crate::options::ToValue::to_value),
                    },
                )*
            ];
        }
    };
}

/// Defines a mirror of a GEnum with its nick/value table.
macro_rules! vips_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $nick:literal,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(i32)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $nick)]
                $variant = $value,
            )*
        }

        impl $name {
            /// Nick/value pairs as registered with GObject.
            pub const NICKS: &'static [(&'static str, i32)] = &[$(($nick, $value),)*];

            pub fn nick(self) -> &'static str {
                match self {
                    $(Self::$variant => $nick,)*
                }
            }
        }

        impl $crate::options::ToValue for $name {
            fn to_value(&self) -> $crate::options::Value<'_> {
                $crate::options::Value::Enum(*self as i32)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.nick())
            }
        }
    };
}

/// Defines a mirror of a GFlags type: a `u32` newtype with one constant per
/// nick. Serialised as the `:`-joined nick string.
macro_rules! vips_flags {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$cmeta:meta])*
                const $flag:ident = $bits:literal => $nick:literal;
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(u32);

        impl $name {
            $(
                $(#[$cmeta])*
                pub const $flag: Self = Self($bits);
            )*

            /// Nick/bit pairs as registered with GObject.
            pub const NICKS: &'static [(&'static str, u32)] = &[$(($nick, $bits),)*];

            pub const fn bits(self) -> u32 {
                self.0
            }

            /// Wraps raw bits without checking them against [`Self::NICKS`].
            pub const fn from_bits_retain(bits: u32) -> Self {
                Self(bits)
            }

            pub const fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl std::ops::BitOrAssign for $name {
            fn bitor_assign(&mut self, rhs: Self) {
                self.0 |= rhs.0;
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::utils::UnknownNick;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::options::parse_flag_nicks(Self::NICKS, s).map(Self)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::utils::UnknownNick;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$name> for String {
            fn from(flags: $name) -> String {
                flags.to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let mut out = String::new();
                $crate::options::push_flag_nicks(Self::NICKS, self.0, &mut out);
                f.write_str(&out)
            }
        }

        impl $crate::options::ToValue for $name {
            fn to_value(&self) -> $crate::options::Value<'_> {
                $crate::options::Value::Flags(self.0)
            }
        }
    };
}

pub mod encoder;
pub mod load;
pub mod save;
pub mod types;

pub use encoder::{MAX_OPTION_STRING_LEN, encode, encode_options, validate};
pub use load::{
    HeifLoadOptions, JpegLoadOptions, LoadOptions, PngLoadOptions, SvgLoadOptions,
    WebpLoadOptions,
};
pub use save::{HeifSaveOptions, JpegSaveOptions, PngSaveOptions, WebpSaveOptions};
pub use types::{
    Access, FailOn, ForeignKeep, ForeignPngFilter, ForeignSubsample, HeifCompression,
    HeifEncoder, WebpPreset,
};

/// Upper bound libvips uses for image coordinates and page heights.
pub const MAX_COORD: i64 = 10_000_000;

/// A present option value, borrowed from its option set.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Bool(bool),
    Int(i64),
    Double(f64),
    /// Raw GEnum value
    Enum(i32),
    /// Raw GFlags bits
    Flags(u32),
    Str(&'a str),
    /// A value with no string encoding (e.g. an array of doubles)
    Unsupported,
}

/// The documented domain of one option field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Domain {
    Bool,
    Int { min: i64, max: i64 },
    Double { min: f64, max: f64 },
    Enum(&'static [(&'static str, i32)]),
    Flags(&'static [(&'static str, u32)]),
    Str,
    Unsupported,
}

impl Domain {
    /// Tests `value` against this domain without panicking.
    ///
    /// Returns the reason when the value lies outside the domain or has the
    /// wrong kind. An unsupported field is admitted here; whether it can be
    /// encoded is a separate question answered by [`Domain::check`].
    pub fn admits(&self, field: &'static str, value: &Value<'_>) -> Result<(), String> {
        match (self, value) {
            (Domain::Unsupported, _) => Ok(()),
            (Domain::Bool, Value::Bool(_)) | (Domain::Str, Value::Str(_)) => Ok(()),
            (Domain::Int { min, max }, Value::Int(v)) => {
                if (*min..=*max).contains(v) {
                    Ok(())
                } else {
                    Err(format!("option `{field}` = {v} is outside [{min}, {max}]"))
                }
            }
            (Domain::Double { min, max }, Value::Double(v)) => {
                if *min <= *v && *v <= *max {
                    Ok(())
                } else {
                    Err(format!("option `{field}` = {v} is outside [{min}, {max}]"))
                }
            }
            (Domain::Enum(nicks), Value::Enum(v)) => {
                if nicks.iter().any(|(_, value)| value == v) {
                    Ok(())
                } else {
                    Err(format!("option `{field}` = {v} is not a member of its enum"))
                }
            }
            (Domain::Flags(nicks), Value::Flags(bits)) => {
                let mask = nicks.iter().fold(0, |mask, (_, b)| mask | b);
                if bits & !mask != 0 {
                    Err(format!("option `{field}` has bits {bits:#x} outside mask {mask:#x}"))
                } else if *bits == 0 && !nicks.iter().any(|(_, b)| *b == 0) {
                    Err(format!("option `{field}` has no bits set and no zero-valued nick"))
                } else {
                    Ok(())
                }
            }
            (domain, value) => Err(format!("option `{field}`: {value:?} does not fit {domain:?}")),
        }
    }

    /// Checks `value` against this domain, then whether it can be encoded.
    ///
    /// # Panics
    ///
    /// Panics when the value lies outside the domain or has the wrong kind.
    /// Such values are programming errors and are never clamped.
    pub fn check(&self, field: &'static str, value: &Value<'_>) -> Result<(), EncodeError> {
        if let Err(reason) = self.admits(field, value) {
            panic!("{reason}");
        }
        match self {
            Domain::Unsupported => Err(EncodeError::Unsupported { field }),
            _ => Ok(()),
        }
    }

    /// Appends the libvips text form of an already checked `value`.
    pub(crate) fn format(&self, value: &Value<'_>, out: &mut String) {
        match (self, value) {
            (_, Value::Bool(b)) => out.push_str(if *b { "true" } else { "false" }),
            (_, Value::Int(v)) => {
                let _ = write!(out, "{v}");
            }
            (_, Value::Double(v)) => {
                let _ = write!(out, "{v}");
            }
            (Domain::Enum(nicks), Value::Enum(v)) => {
                if let Some((nick, _)) = nicks.iter().find(|(_, value)| value == v) {
                    out.push_str(nick);
                }
            }
            (Domain::Flags(nicks), Value::Flags(bits)) => push_flag_nicks(nicks, *bits, out),
            (_, Value::Str(s)) => out.push_str(s),
            _ => unreachable!("values are checked before formatting"),
        }
    }
}

/// Appends the `:`-joined nicks of every single-bit entry set in `bits`,
/// in table order. An empty set uses the zero-valued nick when one exists.
pub(crate) fn push_flag_nicks(nicks: &[(&'static str, u32)], bits: u32, out: &mut String) {
    if bits == 0 {
        if let Some((nick, _)) = nicks.iter().find(|(_, b)| *b == 0) {
            out.push_str(nick);
        }
        return;
    }

    let mut first = true;
    for (nick, b) in nicks {
        if b.is_power_of_two() && bits & b != 0 {
            if !first {
                out.push(':');
            }
            out.push_str(nick);
            first = false;
        }
    }
}

/// Parses nicks separated by `:` or `|` into their combined bits.
pub(crate) fn parse_flag_nicks(
    nicks: &[(&'static str, u32)],
    s: &str,
) -> Result<u32, crate::utils::UnknownNick> {
    s.split([':', '|'])
        .map(str::trim)
        .filter(|nick| !nick.is_empty())
        .try_fold(0, |bits, nick| {
            nicks
                .iter()
                .find(|(name, _)| *name == nick)
                .map(|(_, b)| bits | b)
                .ok_or_else(|| crate::utils::UnknownNick(nick.to_string()))
        })
}

/// Conversion from a field's Rust type to an encoder [`Value`].
pub trait ToValue {
    fn to_value(&self) -> Value<'_>;
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for i32 {
    fn to_value(&self) -> Value<'_> {
        Value::Int(i64::from(*self))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value<'_> {
        Value::Double(*self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for Vec<f64> {
    fn to_value(&self) -> Value<'_> {
        Value::Unsupported
    }
}

/// One entry of an option set's descriptor table.
pub struct Field<O> {
    /// The libvips argument nick, e.g. `fail-on`
    pub name: &'static str,
    pub domain: Domain,
    /// Reads the field, `None` when unset
    pub get: fn(&O) -> Option<Value<'_>>,
}

impl<O> fmt::Debug for Field<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("domain", &self.domain)
            .finish()
    }
}

/// An operation's optional arguments, described by a static field table.
pub trait OptionSet: Sized + 'static {
    /// libvips operation name, e.g. `heifload`
    const OPERATION: &'static str;
    /// Fields in declaration order
    const FIELDS: &'static [Field<Self>];
}

/// Tagged union over every supported option set.
///
/// Exactly one variant is active per call. In JSON the variant is the outer
/// key: `{"heif-load": {"page": 3}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Options {
    Load(LoadOptions),
    HeifLoad(HeifLoadOptions),
    JpegLoad(JpegLoadOptions),
    PngLoad(PngLoadOptions),
    WebpLoad(WebpLoadOptions),
    SvgLoad(SvgLoadOptions),
    HeifSave(HeifSaveOptions),
    JpegSave(JpegSaveOptions),
    PngSave(PngSaveOptions),
    WebpSave(WebpSaveOptions),
}

macro_rules! dispatch {
    ($options:expr, $set:ident => $body:expr) => {
        match $options {
            Options::Load($set) => $body,
            Options::HeifLoad($set) => $body,
            Options::JpegLoad($set) => $body,
            Options::PngLoad($set) => $body,
            Options::WebpLoad($set) => $body,
            Options::SvgLoad($set) => $body,
            Options::HeifSave($set) => $body,
            Options::JpegSave($set) => $body,
            Options::PngSave($set) => $body,
            Options::WebpSave($set) => $body,
        }
    };
}

impl Options {
    /// Encodes the active variant onto `base`, see [`encoder::encode`].
    pub fn encode(&self, base: &str) -> Result<CString, EncodeError> {
        dispatch!(self, set => encode(base, set))
    }

    /// Encodes only the bracketed list; empty when nothing is set.
    pub fn encode_options(&self) -> Result<String, EncodeError> {
        dispatch!(self, set => encode_options(set))
    }

    /// Checks the active variant without panicking, see [`encoder::validate`].
    ///
    /// Use this on option sets that come from outside the program.
    pub fn validate(&self) -> Result<(), EncodeError> {
        dispatch!(self, set => validate(set))
    }

    /// `true` for the saver variants, which only apply when writing a file.
    pub fn is_save(&self) -> bool {
        matches!(
            self,
            Options::HeifSave(_) | Options::JpegSave(_) | Options::PngSave(_) | Options::WebpSave(_)
        )
    }

    /// libvips operation the active variant belongs to.
    pub fn operation(&self) -> &'static str {
        fn operation_of<O: OptionSet>(_: &O) -> &'static str {
            O::OPERATION
        }
        dispatch!(self, set => operation_of(set))
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::Load(LoadOptions::default())
    }
}

macro_rules! impl_from_option_set {
    ($($variant:ident($set:ty)),* $(,)?) => {
        $(
            impl From<$set> for Options {
                fn from(set: $set) -> Self {
                    Self::$variant(set)
                }
            }
        )*
    };
}

impl_from_option_set!(
    Load(LoadOptions),
    HeifLoad(HeifLoadOptions),
    JpegLoad(JpegLoadOptions),
    PngLoad(PngLoadOptions),
    WebpLoad(WebpLoadOptions),
    SvgLoad(SvgLoadOptions),
    HeifSave(HeifSaveOptions),
    JpegSave(JpegSaveOptions),
    PngSave(PngSaveOptions),
    WebpSave(WebpSaveOptions),
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_parse_from_json() {
        let options: Options = serde_json::from_str(
            r#"{"heif-load": {"page": 3, "access": "sequential", "fail-on": "warning"}}"#,
        )
        .unwrap();

        assert_eq!(
            options,
            Options::HeifLoad(HeifLoadOptions {
                page: Some(3),
                access: Some(Access::Sequential),
                fail_on: Some(FailOn::Warning),
                ..HeifLoadOptions::default()
            })
        );
        assert_eq!(options.operation(), "heifload");
    }

    #[test]
    fn unknown_json_field_is_rejected() {
        let result: Result<Options, _> = serde_json::from_str(r#"{"load": {"pages": 1}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn flags_serialise_as_nick_string() {
        let options = Options::HeifSave(HeifSaveOptions {
            keep: Some(ForeignKeep::EXIF | ForeignKeep::ICC),
            ..HeifSaveOptions::default()
        });

        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(json, r#"{"heif-save":{"keep":"exif:icc"}}"#);
        assert_eq!(serde_json::from_str::<Options>(&json).unwrap(), options);
    }

    #[test]
    fn flag_nicks_parse_with_either_separator() {
        assert_eq!("exif|xmp".parse::<ForeignKeep>().unwrap(), ForeignKeep::EXIF | ForeignKeep::XMP);
        assert_eq!("all".parse::<ForeignKeep>().unwrap(), ForeignKeep::ALL);
        assert!("exif:bogus".parse::<ForeignKeep>().is_err());
    }

    #[test]
    fn empty_flag_set_uses_zero_nick() {
        assert_eq!(ForeignKeep::NONE.to_string(), "none");
        assert_eq!(ForeignKeep::ALL.to_string(), "exif:xmp:iptc:icc:other");
    }

    #[test]
    fn json_values_outside_their_domain_fail_validation() {
        let options: Options = serde_json::from_str(r#"{"heif-load": {"page": -5}}"#).unwrap();

        assert_eq!(
            options.validate(),
            Err(EncodeError::OutOfDomain {
                field: "page",
                reason: "option `page` = -5 is outside [0, 100000]".to_string(),
            })
        );
    }

    #[test]
    fn validate_accepts_in_range_values() {
        let options: Options =
            serde_json::from_str(r#"{"webp-load": {"n": -1, "scale": 0.25}}"#).unwrap();
        assert_eq!(options.validate(), Ok(()));
    }

    #[test]
    fn save_variants_are_flagged() {
        assert!(Options::from(HeifSaveOptions::default()).is_save());
        assert!(!Options::from(HeifLoadOptions::default()).is_save());
        assert!(!Options::default().is_save());
    }

    #[test]
    fn admits_reports_without_panicking() {
        let domain = Domain::Flags(ForeignPngFilter::NICKS);
        assert!(domain.admits("filter", &Value::Flags(0)).is_err());
        assert!(domain.admits("filter", &Value::Flags(8)).is_ok());
        assert!(Domain::Unsupported.admits("background", &Value::Unsupported).is_ok());
    }

    #[test]
    #[should_panic(expected = "outside [0, 100000]")]
    fn int_domain_violation_panics() {
        let _ = Domain::Int { min: 0, max: 100_000 }.check("page", &Value::Int(-1));
    }

    #[test]
    #[should_panic(expected = "not a member")]
    fn enum_domain_violation_panics() {
        let _ = Domain::Enum(Access::NICKS).check("access", &Value::Enum(7));
    }

    #[test]
    #[should_panic(expected = "outside mask")]
    fn flag_domain_violation_panics() {
        let _ = Domain::Flags(ForeignKeep::NICKS).check("keep", &Value::Flags(1 << 8));
    }

    #[test]
    #[should_panic(expected = "does not fit")]
    fn kind_mismatch_panics() {
        let _ = Domain::Bool.check("memory", &Value::Int(1));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn nan_is_outside_every_double_domain() {
        let _ = Domain::Double { min: 0.0, max: 1.0 }.check("dither", &Value::Double(f64::NAN));
    }
}
