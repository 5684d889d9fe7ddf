//! Per-request CSP nonces.

use base64::{Engine, engine::general_purpose::STANDARD};
use rand::{CryptoRng, RngCore, rngs::OsRng};
use std::fmt;

/// Bytes of randomness drawn for each nonce.
pub const NONCE_BYTES: usize = 16;

/// A single-use random value, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nonce(String);

impl Nonce {
    /// Draws a fresh nonce from the given cryptographic RNG.
    pub fn generate_with<R: RngCore + CryptoRng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; NONCE_BYTES];
        rng.fill_bytes(&mut bytes);
        Self(STANDARD.encode(bytes))
    }

    /// Wraps an already-encoded value. Intended for tests and fixed sources.
    #[must_use]
    pub fn from_encoded(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the encoded nonce.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Something that hands out a fresh nonce per call.
///
/// Implementations are shared across in-flight requests and must not return
/// correlated values to concurrent callers.
pub trait NonceSource: Send + Sync + 'static {
    /// Issues a new nonce.
    fn issue(&self) -> Nonce;
}

/// Nonce source backed by the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    fn issue(&self) -> Nonce {
        Nonce::generate_with(&mut OsRng)
    }
}
