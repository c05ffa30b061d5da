//! Explore tool definition.
//!
//! A demonstration tool that echoes its parameters back with a message.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{info, instrument};

use super::ToolDefinition;
use crate::core::envelope::Envelope;
use crate::domains::tools::handlers::{Params, ToolHandler, ToolOutput, ToolResult};

/// Explore tool - echoes the received parameters.
pub struct ExploreTool;

impl ToolDefinition for ExploreTool {
    const NAME: &'static str = "explore";
    const DESCRIPTION: &'static str = "Example tool that explores and echoes its parameters";
}

#[async_trait]
impl ToolHandler for ExploreTool {
    #[instrument(skip_all)]
    async fn call(&self, params: Option<Params>) -> anyhow::Result<ToolResult> {
        info!("Explore tool called");

        Ok(Envelope::ok(ToolOutput::new(json!({
            "message": "Exploring... found something interesting!",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "params": params.map(Value::Object).unwrap_or(Value::Null),
        }))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explore_echoes_params() {
        let mut params = Params::new();
        params.insert("depth".to_string(), json!(3));

        let result = ExploreTool.call(Some(params)).await.unwrap();
        let output = &result.data().unwrap().result;
        assert_eq!(output["params"], json!({"depth": 3}));
        assert!(output["message"].as_str().unwrap().contains("Exploring"));
    }

    #[tokio::test]
    async fn test_explore_without_params() {
        let result = ExploreTool.call(None).await.unwrap();
        assert_eq!(result.data().unwrap().result["params"], Value::Null);
    }
}
