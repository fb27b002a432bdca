pub mod litellm {
    pub const API_BASE: &str = "http://localhost:4000";
    pub const DEFAULT_API_KEY: &str = "noop";
    pub const DEFAULT_MODEL_ID: &str = "anthropic/claude-3-7-sonnet-20250219";
    pub const DEFAULT_TEMPERATURE: f32 = 0.0;
    pub const CHAT_COMPLETIONS_ENDPOINT: &str = "/chat/completions";
    pub const MODELS_ENDPOINT: &str = "/models";
    pub const BASE_URL_ENV_VAR: &str = "LITELLM_BASE_URL";
    pub const API_KEY_ENV_VAR: &str = "LITELLM_API_KEY";
    pub const MODEL_ID_ENV_VAR: &str = "LITELLM_MODEL_ID";
}
