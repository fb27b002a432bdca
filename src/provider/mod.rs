pub mod constants;
pub(crate) mod litellm;

pub use litellm::{LiteLlmConfig, LiteLlmHandler, fetch_model_ids};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    LiteLlm,
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::LiteLlm => write!(f, "LiteLLM"),
        }
    }
}

impl Provider {
    /// Get the default environment variable name for this provider's API key
    pub fn default_api_key_env_var(&self) -> &'static str {
        match self {
            Provider::LiteLlm => constants::litellm::API_KEY_ENV_VAR,
        }
    }
}
