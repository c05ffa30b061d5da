//! Reply payloads and canned texts produced by the query router.

use chrono::Local;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::core::envelope::{Envelope, Metadata};

/// Kind of a reply content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Text,
    Image,
    File,
}

/// One item of reply content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    #[serde(rename = "type")]
    pub kind: ContentKind,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl ContentItem {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ContentKind::Text,
            text: Some(text.into()),
            url: None,
            metadata: None,
        }
    }
}

/// Payload of a query reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryContent {
    pub content: Vec<ContentItem>,
}

impl QueryContent {
    /// Text of the first text item, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|item| item.text.as_deref())
    }
}

/// Envelope produced by the query router.
pub type QueryResponse = Envelope<QueryContent>;

/// Wrap `text` in a successful single-item reply.
pub fn text_response(text: impl Into<String>) -> QueryResponse {
    Envelope::ok(QueryContent {
        content: vec![ContentItem::text(text)],
    })
}

pub const GREETING: &str = "Hello! I'm your MCP assistant. How can I help you?";

pub const FALLBACK: &str =
    "I don't understand that command. Type 'help' to see the available options.";

/// Simulated weather conditions.
pub const WEATHER_CONDITIONS: [&str; 5] = [
    "☀️ Sunny",
    "🌤️ Partly cloudy",
    "☁️ Cloudy",
    "🌧️ Rainy",
    "⛈️ Stormy",
];

/// Fixed simulated temperature.
pub const WEATHER_TEMPERATURE: &str = "22°C";

pub fn help_text(tools: &[String], resources: &[String]) -> String {
    format!(
        "Available commands:\n\
         • Tools: {}\n\
         • Resources: {}\n\
         • \"hello\" - Greeting\n\
         • \"time\" - Current time\n\
         • \"weather\" - Simulated weather\n\
         • \"calculate X + Y\" - Simple calculator",
        tools.join(", "),
        resources.join(", ")
    )
}

pub fn time_text() -> String {
    format!("🕐 The current time is: {}", Local::now().format("%c"))
}

pub fn weather_text() -> String {
    let condition = WEATHER_CONDITIONS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(WEATHER_CONDITIONS[0]);
    format!("🌤️ Simulated weather: {condition} - {WEATHER_TEMPERATURE}")
}

pub fn calculation_text(expression: &str, result: &str) -> String {
    format!("🧮 Result: {expression} = {result}")
}

pub fn calculation_error(reason: &str) -> String {
    format!("Could not evaluate that math expression: {reason}")
}

/// System prompt sent to the external generator.
pub fn system_prompt(tools: &[String], resources: &[String]) -> String {
    format!(
        "You are an MCP (Model Context Protocol) assistant that can access resources and tools.\n\n\
         Available resources: {}\n\
         Available tools: {}\n\n\
         Answer helpfully and kindly. If the user asks to use a specific tool, explain how to do it.\n\
         If something is unclear, ask for clarification.",
        resources.join(", "),
        tools.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_response_shape() {
        let value = serde_json::to_value(text_response("hi")).unwrap();
        assert_eq!(value["success"], json!(true));
        assert_eq!(value["data"], json!({"content": [{"type": "text", "text": "hi"}]}));
    }

    #[test]
    fn test_weather_text_uses_known_condition() {
        for _ in 0..20 {
            let text = weather_text();
            assert!(text.contains("22°C"));
            assert!(WEATHER_CONDITIONS.iter().any(|c| text.contains(c)));
        }
    }

    #[test]
    fn test_help_text_lists_names() {
        let text = help_text(&["echo".to_string()], &["hello".to_string(), "docs".to_string()]);
        assert!(text.contains("Tools: echo"));
        assert!(text.contains("Resources: hello, docs"));
    }
}
