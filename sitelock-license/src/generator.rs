//! Issuing licenses and building the snippet a third-party page embeds.

use crate::codec::encode;
use crate::error::LicenseResult;
use crate::record::LicenseRecord;
use chrono::{Months, NaiveDate};

/// Where the embeddable content is served from by default.
pub const DEFAULT_EMBED_BASE_URL: &str = "https://viuflix.online/api/embed.html";

/// A freshly issued license together with its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedLicense {
    /// The record that was encoded.
    pub record: LicenseRecord,
    /// The transport token for `record`.
    pub token: String,
}

impl IssuedLicense {
    /// Returns the embed URL for this license under `base_url`.
    #[must_use]
    pub fn embed_url(&self, base_url: &str) -> String {
        embed_url(base_url, self.record.domain(), &self.token)
    }
}

/// Default expiry: one calendar month after `today`, clamped to the end of
/// shorter months (Jan 31 becomes Feb 28/29).
#[must_use]
pub fn default_expiry(today: NaiveDate) -> NaiveDate {
    today.checked_add_months(Months::new(1)).unwrap_or(today)
}

/// Issues a license for `domain`, generated on `today`.
///
/// # Errors
///
/// Returns an error if the domain is blank or the record cannot be encoded.
pub fn issue(domain: &str, expiry: Option<NaiveDate>, today: NaiveDate) -> LicenseResult<IssuedLicense> {
    let expiry = expiry.unwrap_or_else(|| default_expiry(today));
    let record = LicenseRecord::new(domain, expiry, today)?;
    let token = encode(&record)?;
    Ok(IssuedLicense { record, token })
}

/// Builds `<base_url>?site=<domain>&license=<token>` with both values
/// percent-encoded.
#[must_use]
pub fn embed_url(base_url: &str, domain: &str, token: &str) -> String {
    format!(
        "{base_url}?site={}&license={}",
        urlencoding::encode(&domain.trim().to_lowercase()),
        urlencoding::encode(token)
    )
}

/// Wraps an embed URL in an async script tag.
#[must_use]
pub fn script_tag(url: &str) -> String {
    format!(r#"<script src="{url}" async></script>"#)
}
