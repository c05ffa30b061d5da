//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

use super::error::{Error, Result};
use super::transport::TransportConfig;

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// External generator backend. `None` disables the generator branch of
    /// the query router.
    pub llm: Option<LlmConfig>,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Identifier of an external text-generation backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProviderKind {
    OpenAi,
    Anthropic,
    Ollama,
    Custom,
}

impl LlmProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Anthropic => "anthropic",
            Self::Ollama => "ollama",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for LlmProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "anthropic" => Ok(Self::Anthropic),
            "ollama" => Ok(Self::Ollama),
            "custom" => Ok(Self::Custom),
            other => Err(Error::config(format!("unknown LLM provider: {other}"))),
        }
    }
}

/// External generator backend configuration.
///
/// Only `provider` is required; every other field falls back to a
/// backend-specific default.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    pub provider: LlmProviderKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl LlmConfig {
    /// A bare configuration for `provider` with every option unset.
    pub fn new(provider: LlmProviderKind) -> Self {
        Self {
            provider,
            api_key: None,
            model: None,
            base_url: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Hosted OpenAI preset.
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            model: Some("gpt-3.5-turbo".to_string()),
            temperature: Some(0.7),
            max_tokens: Some(1000),
            ..Self::new(LlmProviderKind::OpenAi)
        }
    }

    /// Local Ollama preset.
    pub fn ollama(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
            model: Some(model.into()),
            temperature: Some(0.7),
            ..Self::new(LlmProviderKind::Ollama)
        }
    }

    /// Load from `MCP_LLM_*` variables. Returns `Ok(None)` when no provider
    /// is configured.
    fn from_env() -> Result<Option<Self>> {
        let Some(provider) = env_var("MCP_LLM_PROVIDER") else {
            return Ok(None);
        };

        let mut config = Self::new(provider.parse()?);
        config.api_key = env_var("MCP_LLM_API_KEY").or_else(|| env_var("OPENAI_API_KEY"));
        config.model = env_var("MCP_LLM_MODEL");
        config.base_url = env_var("MCP_LLM_BASE_URL");
        config.temperature = parse_env_var("MCP_LLM_TEMPERATURE")?;
        config.max_tokens = parse_env_var("MCP_LLM_MAX_TOKENS")?;

        Ok(Some(config))
    }
}

/// Custom Debug implementation to redact secrets from logs.
impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-query-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            llm: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an external generator configuration.
    pub fn with_llm(mut self, llm: LlmConfig) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_LLM_PROVIDER`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Some(name) = env_var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Some(level) = env_var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env()?;

        config.llm = LlmConfig::from_env()?;
        match &config.llm {
            Some(llm) => info!(
                "External generator configured: {} ({})",
                llm.provider,
                llm.model.as_deref().unwrap_or("default model")
            ),
            None => warn!("MCP_LLM_PROVIDER not set - unmatched queries get the canned fallback"),
        }

        Ok(config)
    }
}

/// Read a non-empty environment variable.
pub(crate) fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse an optional environment variable.
pub(crate) fn parse_env_var<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: fmt::Display,
{
    env_var(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| Error::config(format!("invalid {key} value {raw:?}: {e}")))
        })
        .transpose()
}

// Mutex to ensure env var tests run serially
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
