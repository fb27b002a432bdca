use serde::Serialize;

use crate::core::{ChatRole, ContentBlock, Message, MessageContent};

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ChatMessage {
    System {
        content: String,
    },
    User {
        content: ChatContent,
    },
    Assistant {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        tool_call_id: String,
        content: String,
    },
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        ChatMessage::System {
            content: content.into(),
        }
    }

    pub fn user_text(content: impl Into<String>) -> Self {
        ChatMessage::User {
            content: ChatContent::Text(content.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChatContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCall {
    pub id: String,
    /// Always `function`
    #[serde(rename = "type")]
    pub r#type: String,
    pub function: FunctionCall,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded arguments
    pub arguments: String,
}

/// Flatten the generic conversation into chat-completions messages.
pub fn convert_messages_to_openai_format(messages: &[Message]) -> Vec<ChatMessage> {
    let mut converted = Vec::with_capacity(messages.len());

    for message in messages {
        match (&message.role, &message.content) {
            (ChatRole::User, MessageContent::Text(text)) => {
                converted.push(ChatMessage::user_text(text.clone()));
            }
            (ChatRole::Assistant, MessageContent::Text(text)) => {
                converted.push(ChatMessage::Assistant {
                    content: Some(text.clone()),
                    tool_calls: Vec::new(),
                });
            }
            (ChatRole::User, MessageContent::Blocks(blocks)) => {
                convert_user_blocks(blocks, &mut converted);
            }
            (ChatRole::Assistant, MessageContent::Blocks(blocks)) => {
                converted.push(convert_assistant_blocks(blocks));
            }
        }
    }

    converted
}

// Tool results must directly follow the assistant turn that requested them,
// so they go out ahead of the rest of the user content.
fn convert_user_blocks(blocks: &[ContentBlock], out: &mut Vec<ChatMessage>) {
    let mut parts = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::ToolResult {
                tool_use_id,
                content,
            } => out.push(ChatMessage::Tool {
                tool_call_id: tool_use_id.clone(),
                content: content.clone(),
            }),
            ContentBlock::Text { text } => parts.push(ContentPart::Text { text: text.clone() }),
            ContentBlock::Image { media_type, data } => parts.push(ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: format!("data:{media_type};base64,{data}"),
                },
            }),
            ContentBlock::ToolUse { .. } => {}
        }
    }

    if !parts.is_empty() {
        out.push(ChatMessage::User {
            content: ChatContent::Parts(parts),
        });
    }
}

fn convert_assistant_blocks(blocks: &[ContentBlock]) -> ChatMessage {
    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();

    for block in blocks {
        match block {
            ContentBlock::Text { text } => texts.push(text.as_str()),
            ContentBlock::ToolUse { id, name, input } => tool_calls.push(ToolCall {
                id: id.clone(),
                r#type: "function".to_string(),
                function: FunctionCall {
                    name: name.clone(),
                    arguments: input.to_string(),
                },
            }),
            ContentBlock::Image { .. } | ContentBlock::ToolResult { .. } => {}
        }
    }

    ChatMessage::Assistant {
        content: (!texts.is_empty()).then(|| texts.join("\n")),
        tool_calls,
    }
}
