//! Error types for the binding layer.
//!
//! Two tiers only. Programmer errors (option values outside their documented
//! domain) panic. Everything the environment can cause is one of the closed
//! variants below, built with `thiserror`.

use std::ffi::NulError;
use thiserror::Error;

/// Failures while turning an option set into a libvips file-name string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The bracketed option list is longer than the encoder ceiling
    #[error("option string is {len} bytes, limit is {max}")]
    TooLong { len: usize, max: usize },

    /// A field whose kind has no string encoding was set
    #[error("option `{field}` cannot be encoded as a string")]
    Unsupported { field: &'static str },

    /// A value is outside its documented domain
    #[error("{reason}")]
    OutOfDomain { field: &'static str, reason: String },

    /// The base path or a string option contains a NUL byte
    #[error("interior NUL byte at position {0}")]
    InteriorNul(usize),
}

/// A flag or enum nick that is not in its type's table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown nick `{0}`")]
pub struct UnknownNick(pub String);

impl From<NulError> for EncodeError {
    fn from(err: NulError) -> Self {
        Self::InteriorNul(err.nul_position())
    }
}

/// Main error type returned by the image layer.
///
/// Opening a file is not represented here: a file libvips cannot open is
/// reported as an absent handle.
#[derive(Error, Debug)]
pub enum VipsError {
    /// libvips could not be initialised
    #[error("Failed to start libvips: {0}")]
    FailedToStart(String),

    /// `vips_avg` reported an error
    #[error("Failed to compute average: {0}")]
    FailedToComputeAverage(String),

    /// Writing the image to disk failed
    #[error("Failed to save image: {0}")]
    FailedToSave(String),

    /// The option set could not be encoded
    #[error("Option encoding error: {0}")]
    Encode(#[from] EncodeError),
}

/// Convenience result type for image operations.
pub type VipsResult<T> = Result<T, VipsError>;

// Helper methods for error creation
impl VipsError {
    pub fn failed_to_start<T: Into<String>>(msg: T) -> Self {
        Self::FailedToStart(msg.into())
    }

    pub fn failed_to_compute_average<T: Into<String>>(msg: T) -> Self {
        Self::FailedToComputeAverage(msg.into())
    }

    pub fn failed_to_save<T: Into<String>>(msg: T) -> Self {
        Self::FailedToSave(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn nul_error_keeps_position() {
        let err = CString::new("ab\0c").unwrap_err();
        assert_eq!(EncodeError::from(err), EncodeError::InteriorNul(2));
    }

    #[test]
    fn encode_error_converts_into_vips_error() {
        let err: VipsError = EncodeError::Unsupported { field: "background" }.into();
        assert_eq!(
            err.to_string(),
            "Option encoding error: option `background` cannot be encoded as a string"
        );
    }
}
