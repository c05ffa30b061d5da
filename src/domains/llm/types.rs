//! Conversation and reply types shared by every generator backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single conversation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A tool the generator may ask the caller to invoke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    /// JSON schema of the tool's parameters.
    pub parameters: Value,
}

impl ToolDescriptor {
    /// Descriptor for a tool known only by name, accepting any object.
    pub fn for_tool_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: format!("Run the {name} tool"),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            }),
        }
    }
}

/// Conversation plus the tools on offer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<ToolDescriptor>,
}

/// A tool invocation requested by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Value,
}

/// Text produced by the generator, with any requested tool calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatReply {
    pub content: String,
    pub tool_calls: Vec<ToolCall>,
}

impl ChatReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_serializes_lowercase_role() {
        let value = serde_json::to_value(ChatMessage::system("be nice")).unwrap();
        assert_eq!(value, json!({"role": "system", "content": "be nice"}));
    }

    #[test]
    fn test_descriptor_for_tool_name() {
        let descriptor = ToolDescriptor::for_tool_name("explore");
        assert_eq!(descriptor.name, "explore");
        assert!(descriptor.description.contains("explore"));
        assert_eq!(descriptor.parameters["type"], json!("object"));
    }
}
