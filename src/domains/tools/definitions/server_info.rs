//! Server info tool definition.

use async_trait::async_trait;
use serde_json::json;
use std::time::Instant;

use super::ToolDefinition;
use crate::core::config::Config;
use crate::core::envelope::Envelope;
use crate::domains::tools::handlers::{Params, ToolHandler, ToolOutput, ToolResult};

/// Reports server identity and uptime.
pub struct ServerInfoTool {
    name: String,
    version: String,
    started_at: Instant,
}

impl ServerInfoTool {
    pub fn new(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
            started_at: Instant::now(),
        }
    }
}

impl ToolDefinition for ServerInfoTool {
    const NAME: &'static str = "server-info";
    const DESCRIPTION: &'static str = "Get information about the running server";
}

#[async_trait]
impl ToolHandler for ServerInfoTool {
    async fn call(&self, _params: Option<Params>) -> anyhow::Result<ToolResult> {
        Ok(Envelope::ok(ToolOutput::new(json!({
            "server": self.name,
            "version": self.version,
            "uptimeSeconds": self.started_at.elapsed().as_secs_f64(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))))
    }
}
