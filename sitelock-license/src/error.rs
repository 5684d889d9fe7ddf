//! Error types for license tokens.

use thiserror::Error;

/// Licensing-specific errors.
#[derive(Debug, Error)]
pub enum LicenseError {
    /// Domain is empty after normalization.
    #[error("invalid license domain: {0}")]
    InvalidDomain(String),

    /// Record could not be serialized.
    #[error("license encoding failed: {0}")]
    Encoding(String),

    /// Token is not valid base64, not JSON, or is missing a required field.
    #[error("invalid license format: {0}")]
    Decoding(String),
}

/// Result type for license operations.
pub type LicenseResult<T> = Result<T, LicenseError>;
