//! The license record carried inside a token.

use crate::error::{LicenseError, LicenseResult};
use chrono::NaiveDate;
use rand::{Rng, rngs::OsRng};
use serde::{Deserialize, Serialize};

/// Prefix shared by every generated license key.
pub const KEY_PREFIX: &str = "LIC-";

const KEY_SUFFIX_LEN: usize = 9;
const KEY_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A license binding a domain to an expiry date.
///
/// Fields are private: a record can only be built through [`LicenseRecord::new`],
/// [`LicenseRecord::with_key`] or by decoding a token, all of which enforce the
/// domain invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "WireRecord", into = "WireRecord")]
pub struct LicenseRecord {
    key: String,
    domain: String,
    expiry_date: NaiveDate,
    generation_date: NaiveDate,
}

/// Wire shape of a record. Every field is required.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireRecord {
    key: String,
    domain: String,
    expiry_date: NaiveDate,
    generation_date: NaiveDate,
}

impl LicenseRecord {
    /// Creates a record with a freshly generated key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidDomain`] if the domain is blank.
    pub fn new(domain: &str, expiry_date: NaiveDate, generation_date: NaiveDate) -> LicenseResult<Self> {
        Self::with_key(generate_key(), domain, expiry_date, generation_date)
    }

    /// Creates a record with a caller-supplied key.
    ///
    /// # Errors
    ///
    /// Returns [`LicenseError::InvalidDomain`] if the domain is blank.
    pub fn with_key(
        key: impl Into<String>,
        domain: &str,
        expiry_date: NaiveDate,
        generation_date: NaiveDate,
    ) -> LicenseResult<Self> {
        Ok(Self {
            key: key.into(),
            domain: normalize_domain(domain)?,
            expiry_date,
            generation_date,
        })
    }

    /// Returns the display-only license key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the licensed domain (lowercase, trimmed).
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the last day on which the license is valid.
    #[must_use]
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Returns the day the license was issued.
    #[must_use]
    pub fn generation_date(&self) -> NaiveDate {
        self.generation_date
    }
}

impl TryFrom<WireRecord> for LicenseRecord {
    type Error = LicenseError;

    fn try_from(wire: WireRecord) -> LicenseResult<Self> {
        let normalized = normalize_domain(&wire.domain)
            .map_err(|_| LicenseError::Decoding("domain must not be empty".to_string()))?;
        if normalized != wire.domain {
            return Err(LicenseError::Decoding(
                "domain must be lowercase without surrounding whitespace".to_string(),
            ));
        }
        Ok(Self {
            key: wire.key,
            domain: wire.domain,
            expiry_date: wire.expiry_date,
            generation_date: wire.generation_date,
        })
    }
}

impl From<LicenseRecord> for WireRecord {
    fn from(record: LicenseRecord) -> Self {
        Self {
            key: record.key,
            domain: record.domain,
            expiry_date: record.expiry_date,
            generation_date: record.generation_date,
        }
    }
}

/// Trims and lowercases a domain.
///
/// # Errors
///
/// Returns [`LicenseError::InvalidDomain`] if nothing is left after trimming.
pub fn normalize_domain(input: &str) -> LicenseResult<String> {
    let domain = input.trim().to_lowercase();
    if domain.is_empty() {
        return Err(LicenseError::InvalidDomain("domain must not be empty".to_string()));
    }
    Ok(domain)
}

/// Generates a license key from the operating system RNG.
#[must_use]
pub fn generate_key() -> String {
    generate_key_with(&mut OsRng)
}

/// Generates a license key of the form `LIC-XXXXXXXXX` from the given RNG.
pub fn generate_key_with<R: Rng>(rng: &mut R) -> String {
    let suffix: String = (0..KEY_SUFFIX_LEN)
        .map(|_| char::from(KEY_ALPHABET[rng.gen_range(0..KEY_ALPHABET.len())]))
        .collect();
    format!("{KEY_PREFIX}{suffix}")
}
