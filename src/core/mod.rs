//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP server,
//! including error handling, configuration, the response envelope, server
//! lifecycle management, and transport layer abstractions.

pub mod config;
pub mod envelope;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use envelope::{Envelope, Metadata};
pub use error::{Error, Result};
pub use server::{McpServer, McpServerBuilder};
pub use transport::{TransportConfig, TransportService};
