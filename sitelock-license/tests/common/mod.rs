//! Shared test helpers for license tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use sitelock_license::LicenseRecord;

/// Parses a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// A record for `example.com` expiring on 2026-06-30, issued 2026-01-15.
pub fn example_record() -> LicenseRecord {
    record_for("example.com", "2026-06-30")
}

/// A record with a fixed key for the given domain and expiry.
pub fn record_for(domain: &str, expiry: &str) -> LicenseRecord {
    LicenseRecord::with_key("LIC-TEST00001", domain, date(expiry), date("2026-01-15")).unwrap()
}

/// Base64 of an arbitrary JSON payload, bypassing the encoder.
pub fn raw_token(json: &str) -> String {
    use base64::{Engine, engine::general_purpose::STANDARD};
    STANDARD.encode(json.as_bytes())
}
