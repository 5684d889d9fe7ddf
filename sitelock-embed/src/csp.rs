//! Content-Security-Policy for the embed page.

use crate::nonce::Nonce;
use std::fmt;

const SCRIPT_ORIGINS: &[&str] = &[
    "https://unpkg.com",
    "https://cdn.tailwindcss.com",
    "https://www.gstatic.com",
];
const STYLE_ORIGINS: &[&str] = &["https://fonts.googleapis.com", "https://cdn.tailwindcss.com"];
const FONT_ORIGINS: &[&str] = &["https://fonts.gstatic.com"];

/// An ordered list of CSP directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSecurityPolicy {
    directives: Vec<(&'static str, Vec<String>)>,
}

impl ContentSecurityPolicy {
    /// Builds the embed policy, authorizing scripts and styles carrying `nonce`.
    #[must_use]
    pub fn with_nonce(nonce: &Nonce) -> Self {
        let owned = format!("'nonce-{nonce}'");
        let nonce_source = owned.as_str();

        Self {
            directives: vec![
                ("default-src", sources(&["'self'"], &[])),
                ("script-src", sources(&["'self'", nonce_source], SCRIPT_ORIGINS)),
                (
                    "style-src",
                    sources(&["'self'", nonce_source, "'unsafe-inline'"], STYLE_ORIGINS),
                ),
                ("font-src", sources(&["'self'"], FONT_ORIGINS)),
                ("connect-src", sources(&["'self'"], &[])),
                ("img-src", sources(&["'self'", "data:"], &[])),
                ("object-src", sources(&["'none'"], &[])),
                ("base-uri", sources(&["'self'"], &[])),
                ("form-action", sources(&["'self'"], &[])),
                ("frame-ancestors", sources(&["'none'"], &[])),
            ],
        }
    }

    /// Returns the sources listed for `directive`, if present.
    #[must_use]
    pub fn directive(&self, directive: &str) -> Option<&[String]> {
        self.directives
            .iter()
            .find(|(name, _)| *name == directive)
            .map(|(_, values)| values.as_slice())
    }
}

fn sources(fixed: &[&str], origins: &[&str]) -> Vec<String> {
    fixed.iter().chain(origins).map(|s| (*s).to_string()).collect()
}

impl fmt::Display for ContentSecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, values)) in self.directives.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{name} {}", values.join(" "))?;
        }
        Ok(())
    }
}
