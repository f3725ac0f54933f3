//! Option set to libvips file-name string encoding.
//!
//! `encode("in.heic", &opts)` yields `in.heic[page=3,n=-1,access=sequential]`
//! as a NUL-terminated string ready for the C API. Absent fields are skipped,
//! present fields keep declaration order, and an option set with nothing
//! present encodes to the bare base string.

use std::ffi::CString;

use super::{Domain, Field, OptionSet, Value};
use crate::utils::EncodeError;

/// Ceiling on the bracketed option list, brackets included.
pub const MAX_OPTION_STRING_LEN: usize = 256;

/// Encodes `options` and appends the result to `base`.
///
/// # Panics
///
/// Panics when a present field lies outside its declared domain.
pub fn encode<O: OptionSet>(base: &str, options: &O) -> Result<CString, EncodeError> {
    let bracket = encode_options(options)?;

    let mut name = String::with_capacity(base.len() + bracket.len());
    name.push_str(base);
    name.push_str(&bracket);

    Ok(CString::new(name)?)
}

/// Encodes only the `[...]` part; returns an empty string when no field is set.
///
/// Every present field is checked before any text is produced, so a domain
/// violation anywhere in the set panics without partial output.
pub fn encode_options<O: OptionSet>(options: &O) -> Result<String, EncodeError> {
    let present: Vec<(&Field<O>, Value<'_>)> = O::FIELDS
        .iter()
        .filter_map(|field| (field.get)(options).map(|value| (field, value)))
        .collect();

    // Assert every field before reporting an unsupported one, so a domain
    // violation is never hidden behind it.
    let mut unsupported = None;
    for (field, value) in &present {
        if let Err(err) = field.domain.check(field.name, value) {
            unsupported.get_or_insert(err);
        }
    }
    if let Some(err) = unsupported {
        return Err(err);
    }

    if present.is_empty() {
        return Ok(String::new());
    }

    let mut out = String::with_capacity(MAX_OPTION_STRING_LEN);
    out.push('[');
    for (i, (field, value)) in present.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(field.name);
        out.push('=');
        field.domain.format(value, &mut out);
    }
    out.push(']');

    if out.len() > MAX_OPTION_STRING_LEN {
        return Err(EncodeError::TooLong {
            len: out.len(),
            max: MAX_OPTION_STRING_LEN,
        });
    }

    Ok(out)
}

/// Checks every present field without panicking.
///
/// Domain violations are reported first, as [`EncodeError::OutOfDomain`];
/// an unsupported field comes after. A set that passes encodes without
/// panicking.
pub fn validate<O: OptionSet>(options: &O) -> Result<(), EncodeError> {
    let mut unsupported = None;
    for field in O::FIELDS {
        let Some(value) = (field.get)(options) else {
            continue;
        };
        field
            .domain
            .admits(field.name, &value)
            .map_err(|reason| EncodeError::OutOfDomain {
                field: field.name,
                reason,
            })?;
        if field.domain == Domain::Unsupported {
            unsupported.get_or_insert(EncodeError::Unsupported { field: field.name });
        }
    }
    unsupported.map_or(Ok(()), Err)
}
