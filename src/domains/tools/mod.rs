//! Tools domain module.
//!
//! Tools are named operations invoked with an optional parameter bag. Each
//! one is described by a [`ToolEntry`] and executed through a [`ToolHandler`].
//!
//! ## Architecture
//!
//! - `definitions/` - Built-in tools (one file per tool)
//! - `handlers.rs` - Handler contract, output payload and descriptor
//! - `error.rs` - Tool-specific error types

pub mod definitions;
mod error;
mod handlers;

pub use definitions::ToolDefinition;
pub use error::ToolError;
pub use handlers::*;
