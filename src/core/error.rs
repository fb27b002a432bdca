use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum LlmError {
    /// The request never produced an HTTP response.
    #[error("Network error: {message}")]
    Network { message: String, source: BoxError },

    /// The proxy answered with a non-success status.
    #[error("API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Parse error: {message}")]
    Parse { message: String, source: BoxError },

    #[error("Provider configuration error: {0}")]
    ProviderConfiguration(String),

    /// A request failure re-wrapped by the single-string completion path.
    #[error("LiteLLM completion error: {0}")]
    Completion(String),
}

impl LlmError {
    /// The bare message without the variant prefix.
    pub fn detail(&self) -> &str {
        match self {
            LlmError::Network { message, .. }
            | LlmError::Api { message, .. }
            | LlmError::Parse { message, .. } => message,
            LlmError::ProviderConfiguration(message) | LlmError::Completion(message) => message,
        }
    }

    /// Whether this error came out of an attempted request (transport, status or body).
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            LlmError::Network { .. } | LlmError::Api { .. } | LlmError::Parse { .. }
        )
    }

    /// Wrap request failures as [`LlmError::Completion`]; everything else passes through.
    pub fn into_completion_error(self) -> Self {
        if self.is_request_failure() {
            LlmError::Completion(self.detail().to_string())
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_are_rewrapped_for_completion() {
        let err = LlmError::Api {
            message: "boom".to_string(),
            status_code: Some(500),
        }
        .into_completion_error();

        assert!(matches!(err, LlmError::Completion(ref m) if m == "boom"));
        assert_eq!(err.to_string(), "LiteLLM completion error: boom");
    }

    #[test]
    fn configuration_errors_pass_through_unchanged() {
        let err = LlmError::ProviderConfiguration("bad header".to_string()).into_completion_error();

        assert!(matches!(err, LlmError::ProviderConfiguration(ref m) if m == "bad header"));
    }

    #[test]
    fn detail_strips_variant_prefix() {
        let err = LlmError::Parse {
            message: "Failed to parse response as JSON".to_string(),
            source: "eof".into(),
        };
        assert_eq!(err.to_string(), "Parse error: Failed to parse response as JSON");
        assert_eq!(err.detail(), "Failed to parse response as JSON");
    }
}
