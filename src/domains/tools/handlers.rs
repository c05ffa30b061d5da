//! Tool handler contract and descriptor.
//!
//! A tool handler receives an optional parameter bag and produces a
//! [`ToolResult`]. Handlers must tolerate the bag being absent.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::core::envelope::{Envelope, Metadata};

/// Free-form parameters passed to a tool.
pub type Params = Metadata;

/// Payload returned by a tool handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The result data from the tool.
    pub result: serde_json::Value,

    /// Additional attributes describing the result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ToolOutput {
    pub fn new(result: serde_json::Value) -> Self {
        Self {
            result,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Envelope produced by calling a tool.
pub type ToolResult = Envelope<ToolOutput>;

/// Trait for tool handlers.
///
/// Failures are reported as `anyhow::Error` and reach the caller of
/// `call_tool` unchanged.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with the given parameters.
    async fn call(&self, params: Option<Params>) -> anyhow::Result<ToolResult>;
}

#[async_trait]
impl<F, Fut> ToolHandler for F
where
    F: Fn(Option<Params>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<ToolResult>> + Send + 'static,
{
    async fn call(&self, params: Option<Params>) -> anyhow::Result<ToolResult> {
        (self)(params).await
    }
}

/// A registered tool: name, metadata and handler.
#[derive(Clone)]
pub struct ToolEntry {
    name: String,
    metadata: Metadata,
    handler: Arc<dyn ToolHandler>,
}

impl ToolEntry {
    pub fn new(
        name: impl Into<String>,
        metadata: Metadata,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            metadata,
            handler: Arc::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The `description` metadata attribute, if it is a string.
    pub fn description(&self) -> Option<&str> {
        self.metadata.get("description").and_then(|v| v.as_str())
    }

    pub fn handler(&self) -> Arc<dyn ToolHandler> {
        Arc::clone(&self.handler)
    }
}

impl fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.name)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo_entry() -> ToolEntry {
        ToolEntry::new("echo", Metadata::new(), |params: Option<Params>| async move {
            anyhow::Ok(Envelope::ok(ToolOutput::new(
                params.map(serde_json::Value::Object).unwrap_or_default(),
            )))
        })
    }

    #[test]
    fn test_closure_handler_receives_params() {
        let mut params = Params::new();
        params.insert("x".to_string(), json!(1));

        let result = tokio_test::block_on(echo_entry().handler().call(Some(params))).unwrap();
        assert_eq!(result.data().unwrap().result, json!({"x": 1}));
    }

    #[test]
    fn test_closure_handler_tolerates_missing_params() {
        let result = tokio_test::block_on(echo_entry().handler().call(None)).unwrap();
        assert_eq!(result.data().unwrap().result, serde_json::Value::Null);
    }

    #[test]
    fn test_output_serialization() {
        let value = serde_json::to_value(ToolOutput::new(json!({"x": 1}))).unwrap();
        assert_eq!(value, json!({"result": {"x": 1}}));
    }
}
