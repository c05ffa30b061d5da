//! Resource-specific error types.

use thiserror::Error;

/// Errors that can occur while reading a resource.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// No resource is registered under the requested URI.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The registered handler failed; its error is passed through unchanged.
    #[error(transparent)]
    Handler(anyhow::Error),
}

impl ResourceError {
    /// Create a new "not found" error.
    pub fn not_found(uri: impl Into<String>) -> Self {
        Self::NotFound(uri.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
