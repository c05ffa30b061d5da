//! Resource handler contract and descriptor.
//!
//! A resource handler is a zero-argument async operation producing a
//! [`ResourceResult`]. Plain async closures implement the contract, so most
//! resources can be registered without a dedicated type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::core::envelope::{Envelope, Metadata};

/// Payload returned by a resource handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContent {
    /// The resource content as text.
    pub content: String,

    /// The MIME type of the content, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    /// Additional attributes describing the content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ResourceContent {
    /// Create text content with no MIME type.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            mime_type: None,
            metadata: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Envelope produced by reading a resource.
pub type ResourceResult = Envelope<ResourceContent>;

/// Trait for resource handlers.
///
/// Failures are reported as `anyhow::Error` and reach the caller of
/// `read_resource` unchanged.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Produce the current content of the resource.
    async fn read(&self) -> anyhow::Result<ResourceResult>;
}

#[async_trait]
impl<F, Fut> ResourceHandler for F
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<ResourceResult>> + Send + 'static,
{
    async fn read(&self) -> anyhow::Result<ResourceResult> {
        (self)().await
    }
}

/// A registered resource: name, URI, metadata and handler.
#[derive(Clone)]
pub struct ResourceEntry {
    name: String,
    uri: String,
    metadata: Metadata,
    handler: Arc<dyn ResourceHandler>,
}

impl ResourceEntry {
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
        metadata: Metadata,
        handler: impl ResourceHandler + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            metadata,
            handler: Arc::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The `description` metadata attribute, if it is a string.
    pub fn description(&self) -> Option<&str> {
        self.metadata.get("description").and_then(|v| v.as_str())
    }

    pub fn handler(&self) -> Arc<dyn ResourceHandler> {
        Arc::clone(&self.handler)
    }
}

impl fmt::Debug for ResourceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceEntry")
            .field("name", &self.name)
            .field("uri", &self.uri)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_closure_handler() {
        let entry = ResourceEntry::new("greeting", "file:///greeting.txt", Metadata::new(), || async {
            anyhow::Ok(Envelope::ok(
                ResourceContent::text("hi").with_mime_type("text/plain"),
            ))
        });

        let result = tokio_test::block_on(entry.handler().read()).unwrap();
        let content = result.data().unwrap();
        assert_eq!(content.content, "hi");
        assert_eq!(content.mime_type.as_deref(), Some("text/plain"));
    }

    #[test]
    fn test_description_from_metadata() {
        let mut metadata = Metadata::new();
        metadata.insert("description".to_string(), json!("A test resource"));
        let entry = ResourceEntry::new("test", "file:///test.txt", metadata, || async {
            anyhow::Ok(Envelope::ok(ResourceContent::text("")))
        });
        assert_eq!(entry.description(), Some("A test resource"));
    }

    #[test]
    fn test_content_serializes_camel_case() {
        let content = ResourceContent::text("x").with_mime_type("text/plain");
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value, json!({"content": "x", "mimeType": "text/plain"}));
    }
}
