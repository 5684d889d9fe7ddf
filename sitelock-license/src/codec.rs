//! Token encoding: `base64(json(record))`.
//!
//! The transform is the standard, padded base64 alphabet over the UTF-8 JSON
//! bytes, matching what a browser produces with `btoa(JSON.stringify(..))`.

use crate::error::{LicenseError, LicenseResult};
use crate::record::{LicenseRecord, WireRecord};
use base64::{Engine, engine::general_purpose::STANDARD};

/// Encodes a record into a license token.
///
/// # Errors
///
/// Returns [`LicenseError::Encoding`] if the record cannot be serialized.
pub fn encode(record: &LicenseRecord) -> LicenseResult<String> {
    let json = serde_json::to_vec(&WireRecord::from(record.clone()))
        .map_err(|e| LicenseError::Encoding(e.to_string()))?;
    Ok(STANDARD.encode(json))
}

/// Decodes a license token back into a record.
///
/// Surrounding whitespace is ignored. Any other deviation (bad alphabet or
/// padding, non-JSON payload, missing or mistyped field, unnormalized domain)
/// is rejected as a whole; no partially-filled record is ever returned.
///
/// # Errors
///
/// Returns [`LicenseError::Decoding`] describing the first problem found.
pub fn decode(token: &str) -> LicenseResult<LicenseRecord> {
    let bytes = STANDARD
        .decode(token.trim())
        .map_err(|e| LicenseError::Decoding(format!("invalid base64: {e}")))?;

    let wire: WireRecord = serde_json::from_slice(&bytes)
        .map_err(|e| LicenseError::Decoding(format!("invalid payload: {e}")))?;

    LicenseRecord::try_from(wire)
}
