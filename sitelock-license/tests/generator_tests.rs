mod common;

use common::date;
use rand::{SeedableRng, rngs::StdRng};
use sitelock_license::generator::{
    DEFAULT_EMBED_BASE_URL, default_expiry, embed_url, issue, script_tag,
};
use sitelock_license::{KEY_PREFIX, LicenseError, decode, generate_key, generate_key_with};

fn assert_key_shape(key: &str) {
    let suffix = key.strip_prefix(KEY_PREFIX).expect("missing LIC- prefix");
    assert_eq!(suffix.len(), 9);
    assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
}

#[test]
fn generated_keys_have_expected_shape() {
    for _ in 0..100 {
        assert_key_shape(&generate_key());
    }
}

#[test]
fn seeded_key_generation_is_deterministic() {
    let a = generate_key_with(&mut StdRng::seed_from_u64(7));
    let b = generate_key_with(&mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
    assert_key_shape(&a);
}

#[test]
fn default_expiry_is_one_month_ahead() {
    assert_eq!(default_expiry(date("2026-10-19")), date("2026-11-19"));
    assert_eq!(default_expiry(date("2026-12-15")), date("2027-01-15"));
}

#[test]
fn default_expiry_clamps_to_month_end() {
    assert_eq!(default_expiry(date("2026-01-31")), date("2026-02-28"));
    assert_eq!(default_expiry(date("2028-01-31")), date("2028-02-29"));
}

#[test]
fn issue_normalizes_domain_and_encodes() {
    let issued = issue("  Example.COM ", Some(date("2026-12-31")), date("2026-10-19")).unwrap();
    assert_eq!(issued.record.domain(), "example.com");
    assert_eq!(issued.record.generation_date(), date("2026-10-19"));
    assert_key_shape(issued.record.key());
    assert_eq!(decode(&issued.token).unwrap(), issued.record);
}

#[test]
fn issue_without_expiry_uses_default() {
    let issued = issue("example.com", None, date("2026-10-19")).unwrap();
    assert_eq!(issued.record.expiry_date(), date("2026-11-19"));
}

#[test]
fn issue_rejects_blank_domain() {
    assert!(matches!(
        issue("   ", None, date("2026-10-19")),
        Err(LicenseError::InvalidDomain(_))
    ));
}

#[test]
fn embed_url_percent_encodes_token() {
    let url = embed_url("https://cdn.test/api/embed.html", "Example.com", "ab+c/d==");
    assert_eq!(
        url,
        "https://cdn.test/api/embed.html?site=example.com&license=ab%2Bc%2Fd%3D%3D"
    );
}

#[test]
fn issued_license_embed_url_uses_record_domain() {
    let issued = issue("shop.example.com", Some(date("2026-12-31")), date("2026-10-19")).unwrap();
    let url = issued.embed_url(DEFAULT_EMBED_BASE_URL);
    assert!(url.starts_with("https://viuflix.online/api/embed.html?site=shop.example.com&license="));
}

#[test]
fn script_tag_wraps_url() {
    assert_eq!(
        script_tag("https://cdn.test/e.html?site=a.io"),
        r#"<script src="https://cdn.test/e.html?site=a.io" async></script>"#
    );
}
