//! Error types and handling for the MCP server.
//!
//! This module defines the error type returned while building and running
//! the server: configuration, generator backend and transport failures.
//! Per-request tool and resource errors stay in their own domains.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from an external generator backend.
    #[error("LLM error: {0}")]
    Llm(#[from] crate::domains::llm::LlmError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level errors (bind, serve).
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
