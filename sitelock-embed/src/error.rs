//! Error types for embed delivery.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use thiserror::Error;
use tracing::error;

/// Body sent when the template does not exist.
pub const NOT_FOUND_BODY: &str =
    "Not Found: Embeddable content could not be loaded. Check server logs for details.";

/// Body sent for any other failure while loading the template.
pub const INTERNAL_ERROR_BODY: &str =
    "Internal Server Error: Embeddable content could not be loaded. Check server logs for details.";

/// Failure to read the embed template.
#[derive(Debug, Error)]
pub enum TemplateLoadError {
    /// No template at the configured location.
    #[error("embed template not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The template exists but could not be read.
    #[error("failed to read embed template at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TemplateLoadError {
    /// HTTP status reported to the client for this failure.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Errors raised while answering an embed request.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error(transparent)]
    Template(#[from] TemplateLoadError),

    /// The blocking read task panicked or was cancelled.
    #[error("template load task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl EmbedError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Template(e) => e.status_code(),
            Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for EmbedError {
    fn into_response(self) -> Response {
        // Full detail (including paths) stays in the server log.
        error!("Embed request failed: {}", self);
        if let Ok(cwd) = std::env::current_dir() {
            error!("Current working directory: {}", cwd.display());
        }

        let status = self.status_code();
        let body = if status == StatusCode::NOT_FOUND {
            NOT_FOUND_BODY
        } else {
            INTERNAL_ERROR_BODY
        };
        (status, body).into_response()
    }
}
