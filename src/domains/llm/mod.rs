//! External generator adapters.
//!
//! A generator is a remote text-completion backend consulted by the query
//! router when no keyword rule matches. Backends implement [`LlmProvider`]
//! and are selected by [`create_provider`] from an `LlmConfig`.
//!
//! ## Architecture
//!
//! - `types.rs` - Conversation, tool descriptor and reply types
//! - `openai.rs` - OpenAI chat completions backend
//! - `ollama.rs` - Local Ollama backend
//! - `factory.rs` - Provider selection by identifier
//! - `error.rs` - Generator error types

mod error;
mod factory;
mod ollama;
mod openai;
mod types;

pub use error::{LlmError, LlmResult};
pub use factory::create_provider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use types::{ChatMessage, ChatReply, ChatRequest, ChatRole, ToolCall, ToolDescriptor};

use async_trait::async_trait;

/// Trait for external text-generation backends.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Short identifier of the backend (e.g. "openai").
    fn name(&self) -> &str;

    /// The model requests are sent to.
    fn model(&self) -> &str;

    /// Cheap reachability or credential check. Never fails; any probe
    /// error yields `false`.
    async fn is_available(&self) -> bool;

    /// Send a conversation and return the generated reply.
    async fn chat(&self, request: &ChatRequest) -> LlmResult<ChatReply>;
}
