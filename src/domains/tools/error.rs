//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while calling a tool.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The registered handler failed; its error is passed through unchanged.
    #[error(transparent)]
    Handler(anyhow::Error),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
