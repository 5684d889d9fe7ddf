//! Domain-bound license tokens for embeddable content.
//!
//! This crate handles:
//! - Building license records bound to a domain and an expiry date
//! - Encoding records into a URL-transportable token and decoding them back
//! - Validating a record against an observed host and date
//! - Building the embed URL and script tag a third-party page includes
//!
//! # Token Format
//!
//! Tokens are formatted as standard, padded `base64(json)` where the JSON
//! object carries `key`, `domain`, `expiryDate` and `generationDate`, all as
//! strings. Dates use `YYYY-MM-DD`.
//!
//! Tokens are **not** signed. Anyone can decode, edit and re-encode one, so
//! they must not be treated as a security boundary.

mod codec;
mod error;
pub mod generator;
mod record;
mod validate;

pub use codec::{decode, encode};
pub use error::{LicenseError, LicenseResult};
pub use record::{KEY_PREFIX, LicenseRecord, generate_key, generate_key_with, normalize_domain};
pub use validate::{DomainPolicy, ValidationOutcome, validate, validate_token, validate_with};
