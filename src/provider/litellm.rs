//! LiteLLM proxy provider.
//!
//! The proxy speaks the OpenAI chat-completions dialect. Each call issues a
//! single non-streaming request; [`LiteLlmHandler::create_message`] turns the
//! response (or the failure) into [`CompletionEvent`]s, while
//! [`SingleCompletionHandler::complete_prompt`] returns errors to the caller.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use futures::{StreamExt, stream};
use reqwest::{
    Url,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::completions::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ModelsResponse,
    convert_messages_to_openai_format,
};
use crate::core::{
    ApiHandler, CompletionEvent, CompletionStream, HttpClient, HttpClientConfig, LlmError,
    Message, ModelDescriptor, ModelInfo, SingleCompletionHandler,
};
use crate::provider::{Provider, constants::litellm};

/// Settings for a [`LiteLlmHandler`].
///
/// Unset values fall back to the proxy defaults when a call is made.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LiteLlmConfig {
    #[serde(rename = "liteLlmBaseUrl", alias = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(rename = "liteLlmApiKey", alias = "apiKey")]
    pub api_key: Option<String>,
    #[serde(rename = "liteLlmModelId", alias = "modelId")]
    pub model_id: Option<String>,
    #[serde(rename = "liteLlmModelInfo", alias = "modelInfo")]
    pub model_info: Option<ModelInfo>,
    pub temperature: Option<f32>,
    #[serde(rename = "maxTokens")]
    pub max_tokens: Option<u32>,
    /// Applied after `Content-Type` and `Authorization`; later keys win.
    #[serde(rename = "extraHeaders")]
    pub extra_headers: BTreeMap<String, String>,
    #[serde(skip)]
    pub http_config: HttpClientConfig,
}

impl LiteLlmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read base URL, API key and model id from the `LITELLM_*` environment variables.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());

        Self {
            base_url: var(litellm::BASE_URL_ENV_VAR),
            api_key: var(Provider::LiteLlm.default_api_key_env_var()),
            model_id: var(litellm::MODEL_ID_ENV_VAR),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_model_info(mut self, model_info: ModelInfo) -> Self {
        self.model_info = Some(model_info);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_extra_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = config;
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(litellm::API_BASE)
    }

    pub fn effective_api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or(litellm::DEFAULT_API_KEY)
    }

    pub fn effective_model_id(&self) -> &str {
        self.model_id.as_deref().unwrap_or(litellm::DEFAULT_MODEL_ID)
    }

    pub fn effective_temperature(&self) -> f32 {
        self.temperature.unwrap_or(litellm::DEFAULT_TEMPERATURE)
    }

    /// Configured `max_tokens`, else the model's own limit.
    pub fn effective_max_tokens(&self) -> Option<u32> {
        self.max_tokens.or_else(|| match &self.model_info {
            Some(info) => info.max_tokens,
            None => ModelInfo::sane_defaults().max_tokens,
        })
    }
}

/// Completion adapter for a LiteLLM proxy.
pub struct LiteLlmHandler {
    config: LiteLlmConfig,
    http: HttpClient,
}

impl LiteLlmHandler {
    pub fn new(config: LiteLlmConfig) -> Result<Self, LlmError> {
        let http = HttpClient::new(&config.http_config)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &LiteLlmConfig {
        &self.config
    }

    pub fn provider(&self) -> Provider {
        Provider::LiteLlm
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.effective_base_url(), path)
    }

    fn request_headers(&self) -> Result<HeaderMap, LlmError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, bearer_value(self.config.effective_api_key())?);

        for (name, value) in &self.config.extra_headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                LlmError::ProviderConfiguration(format!("Invalid header name {name:?}: {e}"))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| {
                LlmError::ProviderConfiguration(format!("Invalid value for header {name:?}: {e}"))
            })?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn chat_request(&self, system_prompt: &str, messages: &[Message]) -> ChatCompletionRequest {
        let mut chat_messages = Vec::with_capacity(messages.len() + 1);
        chat_messages.push(ChatMessage::system(system_prompt));
        chat_messages.extend(convert_messages_to_openai_format(messages));

        ChatCompletionRequest {
            model: self.config.effective_model_id().to_string(),
            messages: chat_messages,
            temperature: self.config.effective_temperature(),
            max_tokens: self.config.effective_max_tokens(),
            stream: false,
        }
    }
}

impl ApiHandler for LiteLlmHandler {
    fn create_message(&self, system_prompt: &str, messages: &[Message]) -> CompletionStream<'_> {
        let url = self.endpoint(litellm::CHAT_COMPLETIONS_ENDPOINT);
        let headers = self.request_headers();
        let request = self.chat_request(system_prompt, messages);

        let call = async move {
            let result = match headers {
                Ok(headers) => {
                    self.http
                        .post_json::<_, ChatCompletionResponse>(&url, headers, &request)
                        .await
                }
                Err(err) => Err(err),
            };

            match result {
                Ok(response) => response.into_events(),
                Err(err) => {
                    error!(
                        provider = %self.provider(),
                        model = %request.model,
                        error = %err,
                        "Chat completion failed"
                    );
                    vec![CompletionEvent::text(format!(
                        "LiteLLM API error: {}",
                        err.detail()
                    ))]
                }
            }
        };

        stream::once(call).flat_map(stream::iter).boxed()
    }

    fn model(&self) -> ModelDescriptor {
        ModelDescriptor {
            id: self.config.effective_model_id().to_string(),
            info: self.config.model_info.clone().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl SingleCompletionHandler for LiteLlmHandler {
    async fn complete_prompt(&self, prompt: &str) -> Result<String, LlmError> {
        let url = self.endpoint(litellm::CHAT_COMPLETIONS_ENDPOINT);
        let headers = self.request_headers()?;
        let request = ChatCompletionRequest {
            model: self.config.effective_model_id().to_string(),
            messages: vec![ChatMessage::user_text(prompt)],
            temperature: self.config.effective_temperature(),
            max_tokens: None,
            stream: false,
        };

        let response: ChatCompletionResponse = self
            .http
            .post_json(&url, headers, &request)
            .await
            .map_err(|err| {
                warn!(provider = %self.provider(), error = %err, "Prompt completion failed");
                err.into_completion_error()
            })?;

        Ok(response.first_content().to_string())
    }
}

/// List the model ids served by the proxy at `base_url`.
///
/// Returns an empty set without touching the network when `base_url` is
/// missing or unparseable, and an empty set on any request or parse failure.
#[tracing::instrument(name = "fetch_model_ids", skip(api_key))]
pub async fn fetch_model_ids(base_url: Option<&str>, api_key: Option<&str>) -> BTreeSet<String> {
    let Some(base_url) = base_url else {
        return BTreeSet::new();
    };

    if let Err(err) = Url::parse(base_url) {
        debug!(error = %err, "Skipping model lookup for unparseable base URL");
        return BTreeSet::new();
    }

    match request_model_ids(base_url, api_key).await {
        Ok(ids) => ids,
        Err(err) => {
            warn!(error = %err, "Failed to fetch LiteLLM models");
            BTreeSet::new()
        }
    }
}

async fn request_model_ids(
    base_url: &str,
    api_key: Option<&str>,
) -> Result<BTreeSet<String>, LlmError> {
    let http = HttpClient::new(&HttpClientConfig::default())?;

    let mut headers = HeaderMap::new();
    if let Some(api_key) = api_key {
        headers.insert(AUTHORIZATION, bearer_value(api_key)?);
    }

    let url = format!("{base_url}{}", litellm::MODELS_ENDPOINT);
    let response: ModelsResponse = http.get_json(&url, headers).await?;

    Ok(response.data.into_iter().filter_map(|model| model.id).collect())
}

fn bearer_value(api_key: &str) -> Result<HeaderValue, LlmError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
        LlmError::ProviderConfiguration(format!("Invalid API key for Authorization header: {e}"))
    })?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_descriptor_uses_defaults_when_unconfigured() {
        let handler = LiteLlmHandler::new(LiteLlmConfig::new()).unwrap();
        let model = handler.model();

        assert_eq!(model.id, litellm::DEFAULT_MODEL_ID);
        assert_eq!(model.info, ModelInfo::sane_defaults());
    }

    #[test]
    fn model_descriptor_prefers_configured_values() {
        let info = ModelInfo {
            max_tokens: Some(2048),
            context_window: Some(32_000),
            ..ModelInfo::sane_defaults()
        };
        let handler = LiteLlmHandler::new(
            LiteLlmConfig::new()
                .with_model_id("gpt-4o")
                .with_model_info(info.clone()),
        )
        .unwrap();

        let model = handler.model();
        assert_eq!(model.id, "gpt-4o");
        assert_eq!(model.info, info);
    }

    #[test]
    fn config_deserializes_from_settings_keys() {
        let config: LiteLlmConfig = serde_json::from_value(json!({
            "liteLlmBaseUrl": "http://h/v",
            "liteLlmApiKey": "k",
            "liteLlmModelId": "m",
            "liteLlmModelInfo": { "maxTokens": 1024 },
            "temperature": 0.5,
            "extraHeaders": { "X-Team": "core" }
        }))
        .unwrap();

        assert_eq!(config.effective_base_url(), "http://h/v");
        assert_eq!(config.effective_api_key(), "k");
        assert_eq!(config.effective_model_id(), "m");
        assert_eq!(config.effective_max_tokens(), Some(1024));
        assert_eq!(config.effective_temperature(), 0.5);
        assert_eq!(config.extra_headers.get("X-Team").map(String::as_str), Some("core"));
    }

    #[test]
    fn config_accepts_short_aliases() {
        let config: LiteLlmConfig =
            serde_json::from_value(json!({ "baseUrl": "http://proxy:4000", "modelId": "m" }))
                .unwrap();

        assert_eq!(config.effective_base_url(), "http://proxy:4000");
        assert_eq!(config.effective_model_id(), "m");
    }

    #[test]
    fn unset_config_resolves_to_defaults() {
        let config = LiteLlmConfig::new();

        assert_eq!(config.effective_base_url(), "http://localhost:4000");
        assert_eq!(config.effective_api_key(), "noop");
        assert_eq!(config.effective_temperature(), 0.0);
        assert_eq!(config.effective_max_tokens(), None);
    }

    #[test]
    fn configured_max_tokens_wins_over_model_info() {
        let config = LiteLlmConfig::new()
            .with_model_info(ModelInfo {
                max_tokens: Some(8192),
                ..ModelInfo::sane_defaults()
            })
            .with_max_tokens(256);

        assert_eq!(config.effective_max_tokens(), Some(256));
    }

    #[test]
    fn extra_headers_override_fixed_headers() {
        let handler = LiteLlmHandler::new(
            LiteLlmConfig::new()
                .with_api_key("k")
                .with_extra_header("authorization", "Bearer override")
                .with_extra_header("X-Trace", "abc"),
        )
        .unwrap();

        let headers = handler.request_headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer override");
        assert_eq!(headers.get("x-trace").unwrap(), "abc");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get_all(AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn invalid_extra_header_is_a_configuration_error() {
        let handler =
            LiteLlmHandler::new(LiteLlmConfig::new().with_extra_header("bad header", "v")).unwrap();

        assert!(matches!(
            handler.request_headers(),
            Err(LlmError::ProviderConfiguration(_))
        ));
    }

    #[test]
    fn chat_request_prefixes_system_prompt() {
        let handler = LiteLlmHandler::new(LiteLlmConfig::new().with_model_id("m")).unwrap();
        let request = handler.chat_request("be brief", &[Message::user("hi")]);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "m",
                "messages": [
                    { "role": "system", "content": "be brief" },
                    { "role": "user", "content": "hi" }
                ],
                "temperature": 0.0,
                "stream": false
            })
        );
    }
}
