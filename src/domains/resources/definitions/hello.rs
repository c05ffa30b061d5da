//! Greeting resource definition.

use async_trait::async_trait;

use super::ResourceDefinition;
use crate::core::envelope::Envelope;
use crate::domains::resources::handlers::{ResourceContent, ResourceHandler, ResourceResult};

/// Static greeting text served at `file:///hello.txt`.
pub struct HelloResource;

impl HelloResource {
    pub const CONTENT: &'static str = "Hello from the MCP server! This is an example resource.";
}

impl ResourceDefinition for HelloResource {
    const NAME: &'static str = "hello";
    const URI: &'static str = "file:///hello.txt";
    const DESCRIPTION: &'static str = "Example greeting file";
    const MIME_TYPE: &'static str = "text/plain";
}

#[async_trait]
impl ResourceHandler for HelloResource {
    async fn read(&self) -> anyhow::Result<ResourceResult> {
        Ok(Envelope::ok(
            ResourceContent::text(Self::CONTENT).with_mime_type(Self::MIME_TYPE),
        ))
    }
}
