//! Free-text query routing.
//!
//! Input is matched against keyword rules first; when nothing matches the
//! optional external generator is consulted, and any generator problem
//! ends in the fallback reply.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::calculator::{evaluate, format_number};
use super::intent::{Intent, strip_calculation_keywords};
use super::replies::{self, QueryResponse, text_response};
use crate::core::envelope::{Envelope, Metadata};
use crate::domains::Registry;
use crate::domains::llm::{ChatMessage, ChatRequest, LlmProvider, ToolDescriptor};

/// Maps user text to a canned reply or a generated one.
#[derive(Clone)]
pub struct QueryRouter {
    registry: Arc<Registry>,
    generator: Option<Arc<dyn LlmProvider>>,
}

impl std::fmt::Debug for QueryRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryRouter")
            .field("registry", &self.registry)
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .finish()
    }
}

impl QueryRouter {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn LlmProvider>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn has_generator(&self) -> bool {
        self.generator.is_some()
    }

    /// System prompt naming the currently registered tools and resources.
    pub fn system_prompt(&self) -> String {
        replies::system_prompt(
            &self.registry.list_tool_names(),
            &self.registry.list_resource_names(),
        )
    }

    /// Conversation and tool descriptors sent to the generator for `text`.
    pub fn build_chat_request(&self, text: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![
                ChatMessage::system(self.system_prompt()),
                ChatMessage::user(text),
            ],
            tools: self
                .registry
                .list_tool_names()
                .iter()
                .map(|name| ToolDescriptor::for_tool_name(name))
                .collect(),
        }
    }

    /// Produce a reply for `text`.
    ///
    /// Only a malformed calculation yields an unsuccessful envelope.
    #[instrument(skip(self, context))]
    pub async fn process(&self, text: &str, context: Option<&Metadata>) -> QueryResponse {
        if let Some(context) = context {
            debug!("Query context: {:?}", context);
        }

        match Intent::classify(text) {
            Some(intent) => {
                debug!("Matched intent {:?}", intent);
                self.reply_for(intent, text)
            }
            None => self.generate(text).await,
        }
    }

    fn reply_for(&self, intent: Intent, text: &str) -> QueryResponse {
        match intent {
            Intent::Greeting => text_response(replies::GREETING),
            Intent::Help => text_response(replies::help_text(
                &self.registry.list_tool_names(),
                &self.registry.list_resource_names(),
            )),
            Intent::Time => text_response(replies::time_text()),
            Intent::Weather => text_response(replies::weather_text()),
            Intent::Calculation => {
                let expression = strip_calculation_keywords(text);
                match evaluate(&expression) {
                    Ok(value) => text_response(replies::calculation_text(
                        &expression,
                        &format_number(value),
                    )),
                    Err(e) => {
                        debug!("Calculation failed for {:?}: {}", expression, e);
                        Envelope::err(replies::calculation_error(&e.to_string()))
                    }
                }
            }
        }
    }

    async fn generate(&self, text: &str) -> QueryResponse {
        let Some(generator) = &self.generator else {
            return text_response(replies::FALLBACK);
        };

        if !generator.is_available().await {
            warn!("LLM provider {} is not available", generator.name());
            return text_response(replies::FALLBACK);
        }

        match generator.chat(&self.build_chat_request(text)).await {
            Ok(reply) => {
                for call in &reply.tool_calls {
                    info!(
                        "LLM requested tool {} with arguments {}",
                        call.name, call.arguments
                    );
                }
                text_response(reply.content)
            }
            Err(e) => {
                warn!("LLM generation failed: {}", e);
                text_response(replies::FALLBACK)
            }
        }
    }
}
