//! Ollama local LLM backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use super::types::{ChatMessage, ChatReply, ChatRequest};
use super::{LlmError, LlmProvider, LlmResult};
use crate::core::config::LlmConfig;

const DEFAULT_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Ollama API provider for local LLM.
pub struct OllamaProvider {
    client: Client,
    base_url: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OllamaProvider {
    pub const NAME: &'static str = "ollama";

    /// Create a provider from configuration, filling in defaults.
    ///
    /// Uses localhost:11434 when no base URL is configured.
    pub fn new(config: &LlmConfig) -> LlmResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LlmError::init(Self::NAME, e.to_string()))?;

        Ok(Self {
            client,
            base_url: config
                .base_url
                .as_deref()
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    fn options(&self) -> Option<OllamaOptions> {
        if self.temperature.is_none() && self.max_tokens.is_none() {
            return None;
        }
        Some(OllamaOptions {
            temperature: self.temperature,
            num_predict: self.max_tokens,
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn is_available(&self) -> bool {
        // Try to reach the Ollama API
        let result = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(PROBE_TIMEOUT)
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Ollama probe failed: {}", e);
                false
            }
        }
    }

    #[instrument(skip_all, fields(model = %self.model))]
    async fn chat(&self, request: &ChatRequest) -> LlmResult<ChatReply> {
        let body = OllamaRequest {
            model: &self.model,
            messages: &request.messages,
            stream: false,
            options: self.options(),
        };

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::request(Self::NAME, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                provider: Self::NAME,
                status: status.as_u16(),
                body,
            });
        }

        let response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| LlmError::invalid_response(Self::NAME, e.to_string()))?;

        Ok(ChatReply::text(response.message.content))
    }
}

/// Ollama API request structure.
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Ollama API response structure.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::LlmProviderKind;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OllamaProvider {
        OllamaProvider::new(&LlmConfig::ollama(server.uri(), "llama2")).unwrap()
    }

    fn request() -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user("hi")],
            tools: Vec::new(),
        }
    }

    #[test]
    fn test_defaults() {
        let provider = OllamaProvider::new(&LlmConfig::new(LlmProviderKind::Ollama)).unwrap();
        assert_eq!(provider.model(), "llama2");
        assert_eq!(provider.base_url, "http://localhost:11434");
        assert!(provider.options().is_none());
    }

    #[tokio::test]
    async fn test_available_when_tags_respond() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
            .mount(&server)
            .await;

        assert!(provider_for(&server).is_available().await);
    }

    #[tokio::test]
    async fn test_unavailable_on_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/tags"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(!provider_for(&server).is_available().await);
    }

    #[tokio::test]
    async fn test_unavailable_when_unreachable() {
        // Port 9 (discard) is not expected to run an HTTP server
        let provider =
            OllamaProvider::new(&LlmConfig::ollama("http://127.0.0.1:9", "llama2")).unwrap();
        assert!(!provider.is_available().await);
    }

    #[tokio::test]
    async fn test_chat_returns_message_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({
                "model": "llama2",
                "stream": false,
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model": "llama2",
                "message": {"role": "assistant", "content": "Hi! How can I help?"},
                "done": true
            })))
            .mount(&server)
            .await;

        let reply = provider_for(&server).chat(&request()).await.unwrap();
        assert_eq!(reply.content, "Hi! How can I help?");
        assert!(reply.tool_calls.is_empty());
    }

    #[tokio::test]
    async fn test_chat_sends_sampling_options() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(json!({
                "options": {"temperature": 0.5, "num_predict": 42}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": {"role": "assistant", "content": "tuned"},
                "done": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = LlmConfig {
            temperature: Some(0.5),
            max_tokens: Some(42),
            ..LlmConfig::ollama(server.uri(), "llama2")
        };
        let provider = OllamaProvider::new(&config).unwrap();

        let reply = provider.chat(&request()).await.unwrap();
        assert_eq!(reply.content, "tuned");
    }

    #[tokio::test]
    async fn test_chat_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
            .mount(&server)
            .await;

        let err = provider_for(&server).chat(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 404, .. }));
        assert!(err.to_string().contains("model not found"));
    }

    #[tokio::test]
    async fn test_chat_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider_for(&server).chat(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidResponse { .. }));
    }
}
