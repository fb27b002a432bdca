//! Wire types for the OpenAI-compatible chat-completions API exposed by the proxy.

pub mod request;
pub mod response;

pub use request::{
    ChatCompletionRequest, ChatContent, ChatMessage, ContentPart, convert_messages_to_openai_format,
};
pub use response::{ChatCompletionResponse, ModelsResponse};
