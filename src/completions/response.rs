use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

use crate::core::CompletionEvent;

/// Body returned by `POST /chat/completions`.
///
/// Every field is optional and tolerant of the wrong JSON type: a body that
/// parses as JSON but lacks usable content still yields an (empty) text event.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub choices: Option<Vec<Choice>>,
    #[serde(default, deserialize_with = "lenient")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default, deserialize_with = "lenient")]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default, deserialize_with = "lenient")]
    pub prompt_tokens: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub completion_tokens: Option<u32>,
}

/// Decode a field as `T`, or `None` if the JSON value has another shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl ChatCompletionResponse {
    /// Content of the first choice, or `""`.
    pub fn first_content(&self) -> &str {
        self.choices
            .as_deref()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
            .unwrap_or_default()
    }

    /// One text event, plus a usage event when the proxy reported usage.
    pub fn into_events(self) -> Vec<CompletionEvent> {
        let mut events = vec![CompletionEvent::text(self.first_content())];

        if let Some(usage) = self.usage {
            events.push(CompletionEvent::Usage {
                input_tokens: usage.prompt_tokens.unwrap_or(0),
                output_tokens: usage.completion_tokens.unwrap_or(0),
            });
        }

        events
    }
}

/// Body returned by `GET /models`.
#[derive(Debug, Deserialize)]
pub struct ModelsResponse {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
}
