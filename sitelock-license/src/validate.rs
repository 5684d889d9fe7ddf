//! License validation against an observed host and date.
//!
//! Checks run domain first, then expiry; the first failing check decides the
//! outcome. Host and date are always passed in so results are reproducible.

use crate::codec::decode;
use crate::error::LicenseError;
use crate::record::LicenseRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the observed host is matched against the licensed domain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DomainPolicy {
    /// Exact match, or the host ends with the licensed domain as a raw string.
    ///
    /// Known weakness: `notexample.com` passes for a license on `example.com`.
    #[default]
    Suffix,
    /// Exact match, or the host ends with `"." + domain`.
    LabelBoundary,
}

impl DomainPolicy {
    /// Returns true if `host` is covered by a license for `domain`.
    #[must_use]
    pub fn matches(&self, host: &str, domain: &str) -> bool {
        if host == domain {
            return true;
        }
        match self {
            Self::Suffix => host.ends_with(domain),
            Self::LabelBoundary => host
                .strip_suffix(domain)
                .is_some_and(|rest| rest.ends_with('.')),
        }
    }
}

/// Result of validating a license. Returned as data, never as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationOutcome {
    /// Domain and expiry both check out.
    Valid,
    /// The page is running on a host the license does not cover.
    DomainMismatch {
        /// Domain the license was issued for.
        licensed: String,
        /// Host the page is actually running on.
        host: String,
    },
    /// The current date is past the expiry date.
    Expired {
        /// Last valid day.
        expiry: NaiveDate,
    },
    /// The token could not be decoded.
    Malformed {
        /// Decoder diagnostic.
        reason: String,
    },
    /// No license was supplied.
    Absent,
}

impl ValidationOutcome {
    /// Returns true only for [`ValidationOutcome::Valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the user-facing message for this outcome.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("License is valid and active!"),
            Self::DomainMismatch { licensed, host } => write!(
                f,
                "License invalid: This app is licensed for \"{licensed}\", but is running on \"{host}\"."
            ),
            Self::Expired { expiry } => write!(
                f,
                "License expired: This app's license expired on {}.",
                expiry.format("%Y-%m-%d")
            ),
            Self::Malformed { reason } => write!(
                f,
                "Invalid license format or not a valid Base64 string: {reason}."
            ),
            Self::Absent => f.write_str(
                "No active license. Generate and apply one, or embed with a pre-configured license.",
            ),
        }
    }
}

/// Validates a record using the default [`DomainPolicy::Suffix`] rule.
#[must_use]
pub fn validate(record: Option<&LicenseRecord>, current_host: &str, today: NaiveDate) -> ValidationOutcome {
    validate_with(DomainPolicy::Suffix, record, current_host, today)
}

/// Validates a record with an explicit domain policy.
///
/// The host is compared exactly as observed, with no trimming or case
/// folding. The expiry date itself is still valid; the day after is not.
#[must_use]
pub fn validate_with(
    policy: DomainPolicy,
    record: Option<&LicenseRecord>,
    current_host: &str,
    today: NaiveDate,
) -> ValidationOutcome {
    let Some(record) = record else {
        return ValidationOutcome::Absent;
    };

    if !policy.matches(current_host, record.domain()) {
        return ValidationOutcome::DomainMismatch {
            licensed: record.domain().to_string(),
            host: current_host.to_string(),
        };
    }

    if today > record.expiry_date() {
        return ValidationOutcome::Expired {
            expiry: record.expiry_date(),
        };
    }

    ValidationOutcome::Valid
}

/// Decodes and validates a raw token in one step.
///
/// A missing or blank token is [`ValidationOutcome::Absent`]; a token that
/// fails to decode is [`ValidationOutcome::Malformed`].
#[must_use]
pub fn validate_token(token: Option<&str>, current_host: &str, today: NaiveDate) -> ValidationOutcome {
    let Some(token) = token.filter(|t| !t.trim().is_empty()) else {
        return ValidationOutcome::Absent;
    };

    match decode(token) {
        Ok(record) => validate(Some(&record), current_host, today),
        Err(LicenseError::Decoding(reason)) => ValidationOutcome::Malformed { reason },
        Err(other) => ValidationOutcome::Malformed {
            reason: other.to_string(),
        },
    }
}
