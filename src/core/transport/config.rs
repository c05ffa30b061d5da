//! Transport configuration types.

use serde::{Deserialize, Serialize};

use crate::core::config::{env_var, parse_env_var};
use crate::core::error::{Error, Result};

/// Transport configuration options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// MCP JSON-RPC over standard input/output.
    #[cfg(feature = "stdio")]
    Stdio,

    /// REST endpoints over HTTP.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
#[cfg(feature = "http")]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,

    /// Allowed origin when CORS is enabled; `*` allows any.
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

#[cfg(feature = "http")]
const DEFAULT_HTTP_PORT: u16 = 3001;

#[cfg(feature = "http")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

#[cfg(feature = "http")]
fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            Self::Http(HttpConfig::default())
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            Self::Stdio
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
            host: default_host(),
            enable_cors: default_cors(),
            cors_origin: default_cors_origin(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    ///
    /// An unset `MCP_TRANSPORT` selects the default transport.
    pub fn from_env() -> Result<Self> {
        let Some(transport) = env_var("MCP_TRANSPORT") else {
            return Self::default_from_env();
        };

        match transport.trim().to_lowercase().as_str() {
            #[cfg(feature = "http")]
            "http" => Ok(Self::Http(HttpConfig::from_env()?)),
            #[cfg(feature = "stdio")]
            "stdio" => Ok(Self::Stdio),
            other => Err(Error::config(format!(
                "unsupported MCP_TRANSPORT value: {other}"
            ))),
        }
    }

    fn default_from_env() -> Result<Self> {
        #[cfg(feature = "http")]
        {
            Ok(Self::Http(HttpConfig::from_env()?))
        }

        #[cfg(not(feature = "http"))]
        {
            Ok(Self::default())
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (MCP JSON-RPC)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}", cfg.address()),
        }
    }

    /// Check if this transport is the STDIO mode.
    pub fn is_stdio(&self) -> bool {
        #[cfg(feature = "stdio")]
        {
            matches!(self, Self::Stdio)
        }
        #[cfg(not(feature = "stdio"))]
        {
            false
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Bind address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            port: parse_env_var("MCP_HTTP_PORT")?.unwrap_or(defaults.port),
            host: env_var("MCP_HTTP_HOST").unwrap_or(defaults.host),
            enable_cors: env_var("MCP_HTTP_CORS")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.enable_cors),
            cors_origin: env_var("MCP_HTTP_CORS_ORIGIN").unwrap_or(defaults.cors_origin),
        })
    }
}
