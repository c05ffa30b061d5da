//! MCP Query Server Library
//!
//! A Model Context Protocol style server that exposes registered resources
//! and tools, and answers free-text queries with keyword-matched replies or
//! an optional external text generator.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the response envelope, the
//!   server facade and the transports
//! - **domains**: business logic organized by bounded contexts
//!   - **resources** / **tools**: handler contracts and built-in definitions
//!   - **registry** / **dispatcher**: the catalog and handler invocation
//!   - **query**: free-text routing with a generator fallback
//!   - **llm**: pluggable generator backends
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_query_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let transport = TransportService::new(config.transport.clone());
//!     let server = McpServer::new(config)?;
//!     transport.run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Envelope, Error, McpServer, Result};
