//! External generator error types.

use thiserror::Error;

use crate::core::config::LlmProviderKind;

/// Result type for generator operations.
pub type LlmResult<T> = Result<T, LlmError>;

/// Errors raised by generator backends and the provider factory.
///
/// Everything except `UnsupportedProvider` is a "generation failed"
/// condition; the query router absorbs those and falls back.
#[derive(Debug, Error)]
pub enum LlmError {
    /// The configured backend identifier has no adapter.
    #[error("Unsupported LLM provider: {0}")]
    UnsupportedProvider(LlmProviderKind),

    /// The backend could not be reached or the request failed in transit.
    #[error("Request to {provider} failed: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The backend answered with a body that could not be interpreted.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        provider: &'static str,
        message: String,
    },

    /// The provider could not be constructed (e.g. HTTP client setup).
    #[error("Failed to initialize {provider}: {message}")]
    Init {
        provider: &'static str,
        message: String,
    },
}

impl LlmError {
    pub fn request(provider: &'static str, source: reqwest::Error) -> Self {
        Self::Request { provider, source }
    }

    pub fn invalid_response(provider: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            provider,
            message: message.into(),
        }
    }

    pub fn init(provider: &'static str, message: impl Into<String>) -> Self {
        Self::Init {
            provider,
            message: message.into(),
        }
    }

    /// True for failures of a generation attempt (as opposed to setup).
    pub fn is_generation_failure(&self) -> bool {
        matches!(
            self,
            Self::Request { .. } | Self::Api { .. } | Self::InvalidResponse { .. }
        )
    }
}
