//! # litellm-adapter
//!
//! Chat completions against a self-hosted [LiteLLM](https://github.com/BerriAI/litellm)
//! proxy, exposed as a stream of text and usage events.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use litellm_adapter::{ApiHandler, CompletionEvent, LiteLlmConfig, LiteLlmHandler, Message};
//!
//! # async fn run() -> Result<(), litellm_adapter::LlmError> {
//! let handler = LiteLlmHandler::new(
//!     LiteLlmConfig::new()
//!         .with_base_url("http://localhost:4000")
//!         .with_model_id("gpt-4o-mini"),
//! )?;
//!
//! let mut events = handler.create_message("You are terse.", &[Message::user("Hello!")]);
//! while let Some(event) = events.next().await {
//!     match event {
//!         CompletionEvent::Text { text } => println!("{text}"),
//!         CompletionEvent::Usage { input_tokens, output_tokens } => {
//!             println!("tokens: {input_tokens} in / {output_tokens} out")
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error handling
//!
//! [`ApiHandler::create_message`] never fails: a failed request shows up as a
//! single text event starting with `LiteLLM API error:`.
//! [`SingleCompletionHandler::complete_prompt`] returns the error instead.

pub mod completions;
pub mod core;
pub mod provider;

pub use crate::core::{
    ApiHandler, ChatRole, CompletionEvent, CompletionStream, ContentBlock, HttpClientConfig,
    LlmError, Message, MessageContent, ModelDescriptor, ModelInfo, SingleCompletionHandler,
};
pub use provider::{LiteLlmConfig, LiteLlmHandler, Provider, fetch_model_ids};
