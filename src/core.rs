pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::{ApiHandler, CompletionStream, SingleCompletionHandler};
pub use types::{
    ChatRole, CompletionEvent, ContentBlock, Message, MessageContent, ModelDescriptor, ModelInfo,
};
