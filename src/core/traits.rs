use async_trait::async_trait;
use futures::stream::BoxStream;

use super::{
    error::LlmError,
    types::{CompletionEvent, Message, ModelDescriptor},
};

/// Lazy, finite stream of completion events for one call.
pub type CompletionStream<'a> = BoxStream<'a, CompletionEvent>;

/// Streamed chat completion over a provider-agnostic conversation.
///
/// Implementations never fail the stream: errors surface as a final
/// [`CompletionEvent::Text`] describing what went wrong.
pub trait ApiHandler: Send + Sync {
    fn create_message(&self, system_prompt: &str, messages: &[Message]) -> CompletionStream<'_>;

    fn model(&self) -> ModelDescriptor;
}

/// One-shot prompt completion. Unlike [`ApiHandler::create_message`], errors are returned.
#[async_trait]
pub trait SingleCompletionHandler: Send + Sync {
    async fn complete_prompt(&self, prompt: &str) -> Result<String, LlmError>;
}
