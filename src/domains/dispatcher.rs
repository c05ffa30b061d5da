//! Dispatcher - resolves a resource URI or tool name and invokes its handler.
//!
//! The dispatcher adds no timeout, retry or cancellation policy of its own.
//! Handler failures are logged and handed back unchanged.

use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::Registry;
use super::resources::{ResourceError, ResourceResult};
use super::tools::{Params, ToolError, ToolResult};

/// Routes read and call requests to registered handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Read the first resource registered under `uri`.
    #[instrument(skip(self))]
    pub async fn read_resource(&self, uri: &str) -> Result<ResourceResult, ResourceError> {
        let entry = self
            .registry
            .find_resource_by_uri(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        debug!("Reading resource {} via {}", entry.name(), uri);
        entry.handler().read().await.map_err(|e| {
            error!("Error reading resource {}: {}", entry.name(), e);
            ResourceError::Handler(e)
        })
    }

    /// Call the tool registered under `name` with optional parameters.
    #[instrument(skip(self, params))]
    pub async fn call_tool(
        &self,
        name: &str,
        params: Option<Params>,
    ) -> Result<ToolResult, ToolError> {
        let entry = self
            .registry
            .find_tool_by_name(name)
            .ok_or_else(|| ToolError::not_found(name))?;

        debug!("Calling tool {}", name);
        entry.handler().call(params).await.map_err(|e| {
            error!("Error executing tool {}: {}", name, e);
            ToolError::Handler(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::envelope::{Envelope, Metadata};
    use crate::domains::resources::ResourceContent;
    use crate::domains::tools::ToolOutput;
    use serde_json::{Value, json};

    fn dispatcher_with(registry: Registry) -> Dispatcher {
        Dispatcher::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_echo_tool_round_trip() {
        let mut registry = Registry::new();
        registry.register_tool("echo", Metadata::new(), |params: Option<Params>| async move {
            anyhow::Ok(Envelope::ok(ToolOutput::new(
                params.map(Value::Object).unwrap_or(Value::Null),
            )))
        });
        let dispatcher = dispatcher_with(registry);

        let mut params = Params::new();
        params.insert("x".to_string(), json!(1));
        let result = dispatcher.call_tool("echo", Some(params)).await.unwrap();

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"], json!({"result": {"x": 1}}));
    }

    #[tokio::test]
    async fn test_missing_resource_is_not_found() {
        let dispatcher = dispatcher_with(Registry::new());

        let err = dispatcher.read_resource("file:///missing").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("file:///missing"));
    }

    #[tokio::test]
    async fn test_missing_tool_is_not_found() {
        let dispatcher = dispatcher_with(Registry::new());

        let err = dispatcher.call_tool("nonexistent-tool", None).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Tool not found: nonexistent-tool");
    }

    #[tokio::test]
    async fn test_resource_handler_invoked() {
        let mut registry = Registry::new();
        registry.register_resource("test", "file://test.txt", Metadata::new(), || async {
            anyhow::Ok(Envelope::ok(
                ResourceContent::text("test content").with_mime_type("text/plain"),
            ))
        });
        let dispatcher = dispatcher_with(registry);

        let result = dispatcher.read_resource("file://test.txt").await.unwrap();
        assert_eq!(result.data().unwrap().content, "test content");
    }

    #[tokio::test]
    async fn test_handler_failure_propagates_unchanged() {
        let mut registry = Registry::new();
        registry.register_tool("broken", Metadata::new(), |_params: Option<Params>| async {
            Err::<ToolResult, _>(anyhow::anyhow!("disk on fire"))
        });
        registry.register_resource("flaky", "file:///flaky", Metadata::new(), || async {
            Err::<ResourceResult, _>(anyhow::anyhow!("backend offline"))
        });
        let dispatcher = dispatcher_with(registry);

        let err = dispatcher.call_tool("broken", None).await.unwrap_err();
        assert!(matches!(err, ToolError::Handler(_)));
        assert_eq!(err.to_string(), "disk on fire");

        let err = dispatcher.read_resource("file:///flaky").await.unwrap_err();
        assert!(matches!(err, ResourceError::Handler(_)));
        assert_eq!(err.to_string(), "backend offline");
    }
}
