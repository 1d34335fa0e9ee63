//! Result decode rules.
//!
//! Each facade operation declares one of three rules for its raw payload:
//! canonical boolean, opaque string (returned verbatim, no decode step
//! here), or structured JSON.  A payload that does not match its rule is a
//! [`Error::Conversion`]: a contract mismatch with the remote plugin,
//! distinct from the plugin reporting failure.

use serde::de::DeserializeOwned;
use serde_json::Value;

use ep_domain::error::{Error, Result};

/// Decode a canonical boolean payload.
///
/// Accepts `true`/`false` in any ASCII case.  Everything else is a
/// conversion error, including `"1"`, `"0"`, `"yes"`, and the empty
/// string.
pub fn boolean(payload: &str) -> Result<bool> {
    if payload.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if payload.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::Conversion(format!(
            "expected boolean payload, got {payload:?}"
        )))
    }
}

/// Decode a structured payload into `T`.
pub fn structured<T: DeserializeOwned>(payload: &str) -> Result<T> {
    serde_json::from_str(payload)
        .map_err(|e| Error::Conversion(format!("structured payload: {e}")))
}

/// Decode a structured payload that must be a JSON object.
///
/// Used by operations whose result record is kept opaque: the shape is
/// checked, the fields are not.
pub fn object(payload: &str) -> Result<Value> {
    let value: Value = structured(payload)?;
    if value.is_object() {
        Ok(value)
    } else {
        Err(Error::Conversion(format!(
            "expected a JSON object, got {value}"
        )))
    }
}
