//! Built-in tool definitions.
//!
//! Each tool is defined in its own file for better maintainability.

mod explore;
mod server_info;

pub use explore::ExploreTool;
pub use server_info::ServerInfoTool;

use serde_json::Value;

use super::handlers::{ToolEntry, ToolHandler};
use crate::core::config::Config;
use crate::core::envelope::Metadata;
use crate::domains::Registry;

/// Trait for tool definitions with static descriptors.
pub trait ToolDefinition: ToolHandler + Sized + 'static {
    /// Tool name as registered.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Build the registry entry for this tool.
    fn into_entry(self) -> ToolEntry {
        let mut metadata = Metadata::new();
        metadata.insert("description".to_string(), Value::from(Self::DESCRIPTION));
        ToolEntry::new(Self::NAME, metadata, self)
    }
}

/// Register every built-in tool.
pub fn register_defaults(registry: &mut Registry, config: &Config) {
    registry.insert_tool(ExploreTool.into_entry());
    registry.insert_tool(ServerInfoTool::new(config).into_entry());
}
