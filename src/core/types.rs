use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the provider-agnostic conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: ChatRole,
    pub content: MessageContent,
}

impl Message {
    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        MessageContent::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        MessageContent::Text(text.to_string())
    }
}

impl From<Vec<ContentBlock>> for MessageContent {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        MessageContent::Blocks(blocks)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    /// Base64-encoded image data
    Image {
        media_type: String,
        data: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        content: String,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}

/// One unit of the streamed completion output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CompletionEvent {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    Usage {
        input_tokens: u32,
        output_tokens: u32,
    },
}

impl CompletionEvent {
    pub fn text(text: impl Into<String>) -> Self {
        CompletionEvent::Text { text: text.into() }
    }
}

/// Capability metadata for a model served by the proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelInfo {
    /// Upper bound on generated tokens; `None` lets the proxy decide
    pub max_tokens: Option<u32>,
    pub context_window: Option<u32>,
    pub supports_images: bool,
    pub supports_prompt_cache: bool,
    /// USD per million input tokens
    pub input_price: Option<f64>,
    /// USD per million output tokens
    pub output_price: Option<f64>,
    pub description: Option<String>,
}

impl ModelInfo {
    /// Defaults used when the caller configures no model info.
    pub fn sane_defaults() -> Self {
        Self {
            max_tokens: None,
            context_window: Some(128_000),
            supports_images: true,
            supports_prompt_cache: true,
            input_price: Some(0.0),
            output_price: Some(0.0),
            description: None,
        }
    }
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self::sane_defaults()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    pub id: String,
    pub info: ModelInfo,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn events_serialize_with_type_tag() {
        let text = serde_json::to_value(CompletionEvent::text("hi")).unwrap();
        assert_eq!(text, json!({ "type": "text", "text": "hi" }));

        let usage = serde_json::to_value(CompletionEvent::Usage {
            input_tokens: 3,
            output_tokens: 5,
        })
        .unwrap();
        assert_eq!(
            usage,
            json!({ "type": "usage", "inputTokens": 3, "outputTokens": 5 })
        );
    }

    #[test]
    fn partial_model_info_fills_in_defaults() {
        let info: ModelInfo =
            serde_json::from_value(json!({ "maxTokens": 4096, "supportsImages": false })).unwrap();

        assert_eq!(info.max_tokens, Some(4096));
        assert!(!info.supports_images);
        assert_eq!(info.context_window, Some(128_000));
        assert!(info.supports_prompt_cache);
    }

    #[test]
    fn message_content_accepts_plain_text_or_blocks() {
        let plain: Message =
            serde_json::from_value(json!({ "role": "user", "content": "hello" })).unwrap();
        assert_eq!(plain, Message::user("hello"));

        let blocks: Message = serde_json::from_value(json!({
            "role": "assistant",
            "content": [{ "type": "text", "text": "hello" }]
        }))
        .unwrap();
        assert_eq!(
            blocks,
            Message::assistant(vec![ContentBlock::text("hello")])
        );
    }
}
