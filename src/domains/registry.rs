//! Registry - the in-memory catalog of resources and tools.
//!
//! Resource names and tool names are independent namespaces; within each,
//! names are unique. Entries keep registration order, and re-registering a
//! name replaces the descriptor in place.
//!
//! Lookups are linear scans. Registries hold tens of entries, and lookup by
//! URI has to scan anyway since URIs are not required to be unique.

use tracing::{debug, info};

use super::resources::{ResourceEntry, ResourceHandler};
use super::tools::{ToolEntry, ToolHandler};
use crate::core::envelope::Metadata;

/// Catalog of registered resources and tools.
#[derive(Debug, Default)]
pub struct Registry {
    resources: Vec<ResourceEntry>,
    tools: Vec<ToolEntry>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Resources
    // ========================================================================

    /// Register a resource, replacing any resource with the same name.
    pub fn register_resource(
        &mut self,
        name: impl Into<String>,
        uri: impl Into<String>,
        metadata: Metadata,
        handler: impl ResourceHandler + 'static,
    ) {
        self.insert_resource(ResourceEntry::new(name, uri, metadata, handler));
    }

    /// Insert a prebuilt resource entry, replacing any with the same name.
    pub fn insert_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {} -> {}", entry.name(), entry.uri());
        match self.resources.iter_mut().find(|r| r.name() == entry.name()) {
            Some(existing) => {
                debug!("Replacing existing resource: {}", entry.name());
                *existing = entry;
            }
            None => self.resources.push(entry),
        }
    }

    /// Remove a resource by name, returning it if it was registered.
    pub fn unregister_resource(&mut self, name: &str) -> Option<ResourceEntry> {
        let index = self.resources.iter().position(|r| r.name() == name)?;
        info!("Unregistering resource: {}", name);
        Some(self.resources.remove(index))
    }

    /// Find the first resource registered under `uri`.
    pub fn find_resource_by_uri(&self, uri: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|r| r.uri() == uri)
    }

    pub fn find_resource_by_name(&self, name: &str) -> Option<&ResourceEntry> {
        self.resources.iter().find(|r| r.name() == name)
    }

    /// Resource names in registration order.
    pub fn list_resource_names(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.name().to_string()).collect()
    }

    pub fn resource_entries(&self) -> &[ResourceEntry] {
        &self.resources
    }

    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    // ========================================================================
    // Tools
    // ========================================================================

    /// Register a tool, replacing any tool with the same name.
    pub fn register_tool(
        &mut self,
        name: impl Into<String>,
        metadata: Metadata,
        handler: impl ToolHandler + 'static,
    ) {
        self.insert_tool(ToolEntry::new(name, metadata, handler));
    }

    /// Insert a prebuilt tool entry, replacing any with the same name.
    pub fn insert_tool(&mut self, entry: ToolEntry) {
        info!("Registering tool: {}", entry.name());
        match self.tools.iter_mut().find(|t| t.name() == entry.name()) {
            Some(existing) => {
                debug!("Replacing existing tool: {}", entry.name());
                *existing = entry;
            }
            None => self.tools.push(entry),
        }
    }

    /// Remove a tool by name, returning it if it was registered.
    pub fn unregister_tool(&mut self, name: &str) -> Option<ToolEntry> {
        let index = self.tools.iter().position(|t| t.name() == name)?;
        info!("Unregistering tool: {}", name);
        Some(self.tools.remove(index))
    }

    pub fn find_tool_by_name(&self, name: &str) -> Option<&ToolEntry> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Tool names in registration order.
    pub fn list_tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    pub fn tool_entries(&self) -> &[ToolEntry] {
        &self.tools
    }

    pub fn tool_count(&self) -> usize {
        self.tools.len()
    }

    /// True when neither resources nor tools are registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty() && self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::envelope::Envelope;
    use crate::domains::resources::ResourceContent;
    use crate::domains::tools::{Params, ToolOutput};
    use serde_json::json;

    fn add_resource(registry: &mut Registry, name: &str, uri: &str, body: &'static str) {
        registry.register_resource(name, uri, Metadata::new(), move || async move {
            anyhow::Ok(Envelope::ok(ResourceContent::text(body)))
        });
    }

    fn add_tool(registry: &mut Registry, name: &str, tag: &'static str) {
        registry.register_tool(name, Metadata::new(), move |_params: Option<Params>| async move {
            anyhow::Ok(Envelope::ok(ToolOutput::new(json!(tag))))
        });
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.list_resource_names().is_empty());
        assert!(registry.list_tool_names().is_empty());
    }

    #[test]
    fn test_find_resource_by_uri_returns_registered_entry() {
        let mut registry = Registry::new();
        add_resource(&mut registry, "a", "file:///a.txt", "A");
        add_resource(&mut registry, "b", "file:///b.txt", "B");

        let entry = registry.find_resource_by_uri("file:///b.txt").unwrap();
        assert_eq!(entry.name(), "b");
        assert!(registry.find_resource_by_uri("file:///c.txt").is_none());
    }

    #[tokio::test]
    async fn test_reregistering_resource_replaces_in_place() {
        let mut registry = Registry::new();
        add_resource(&mut registry, "a", "file:///a.txt", "old");
        add_resource(&mut registry, "b", "file:///b.txt", "B");
        add_resource(&mut registry, "a", "file:///a2.txt", "new");

        assert_eq!(registry.list_resource_names(), vec!["a", "b"]);
        assert!(registry.find_resource_by_uri("file:///a.txt").is_none());

        let entry = registry.find_resource_by_uri("file:///a2.txt").unwrap();
        let result = entry.handler().read().await.unwrap();
        assert_eq!(result.data().unwrap().content, "new");
    }

    #[test]
    fn test_duplicate_uri_first_registration_wins() {
        let mut registry = Registry::new();
        add_resource(&mut registry, "primary", "file:///shared.txt", "1");
        add_resource(&mut registry, "alias", "file:///shared.txt", "2");

        let entry = registry.find_resource_by_uri("file:///shared.txt").unwrap();
        assert_eq!(entry.name(), "primary");
        assert_eq!(registry.resource_count(), 2);
    }

    #[test]
    fn test_tool_names_keep_registration_order() {
        let mut registry = Registry::new();
        add_tool(&mut registry, "zeta", "z");
        add_tool(&mut registry, "alpha", "a");
        add_tool(&mut registry, "mid", "m");
        add_tool(&mut registry, "alpha", "a2");

        let first = registry.list_tool_names();
        let second = registry.list_tool_names();
        assert_eq!(first, vec!["zeta", "alpha", "mid"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_resource_and_tool_namespaces_are_independent() {
        let mut registry = Registry::new();
        add_resource(&mut registry, "shared", "file:///shared.txt", "r");
        add_tool(&mut registry, "shared", "t");

        assert_eq!(registry.resource_count(), 1);
        assert_eq!(registry.tool_count(), 1);
        assert!(registry.find_tool_by_name("shared").is_some());
        assert!(registry.find_resource_by_name("shared").is_some());
    }

    #[test]
    fn test_unregister() {
        let mut registry = Registry::new();
        add_resource(&mut registry, "a", "file:///a.txt", "A");
        add_tool(&mut registry, "t", "t");

        assert_eq!(registry.unregister_resource("a").unwrap().name(), "a");
        assert!(registry.unregister_resource("a").is_none());
        assert_eq!(registry.unregister_tool("t").unwrap().name(), "t");
        assert!(registry.is_empty());
    }
}
