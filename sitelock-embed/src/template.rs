//! Loading the embed page template.

use crate::error::TemplateLoadError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Marker replaced by the request nonce wherever it appears in the template.
pub const NONCE_PLACEHOLDER: &str = "NONCE_PLACEHOLDER";

/// Source of the embed page template.
///
/// `load` is a blocking call; the server runs it off the async executor.
pub trait TemplateStore: Send + Sync + 'static {
    /// Reads the current template.
    fn load(&self) -> Result<String, TemplateLoadError>;
}

/// Reads the template from a file on every call, so edits are picked up
/// without a restart.
#[derive(Debug, Clone)]
pub struct FileTemplateStore {
    path: PathBuf,
}

impl FileTemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateStore for FileTemplateStore {
    fn load(&self) -> Result<String, TemplateLoadError> {
        std::fs::read_to_string(&self.path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => TemplateLoadError::NotFound {
                path: self.path.clone(),
            },
            _ => TemplateLoadError::Io {
                path: self.path.clone(),
                source,
            },
        })
    }
}

/// An in-memory template.
#[derive(Debug, Clone)]
pub struct StaticTemplateStore(String);

impl StaticTemplateStore {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }
}

impl TemplateStore for StaticTemplateStore {
    fn load(&self) -> Result<String, TemplateLoadError> {
        Ok(self.0.clone())
    }
}

/// Replaces every occurrence of `placeholder` in `template` with `nonce`.
#[must_use]
pub fn render(template: &str, placeholder: &str, nonce: &str) -> String {
    if placeholder.is_empty() {
        return template.to_string();
    }
    template.replace(placeholder, nonce)
}
