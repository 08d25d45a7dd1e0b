//! Model Gateway — the single point of entry for all model calls.
//!
//! Both backends expose one contract: `complete(prompt) -> ModelResponse`.
//! The orchestrator holds an `Arc<dyn ModelGateway>` and never branches on
//! which backend is active. One attempt per call — no retry, no streaming.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{BackendKind, Config};
use crate::errors::PipelineError;

pub mod ollama;
pub mod openai;

pub use ollama::OllamaGateway;
pub use openai::OpenAiGateway;

/// Tags which backend produced a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Remote,
    Local,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Remote => write!(f, "remote"),
            Backend::Local => write!(f, "local"),
        }
    }
}

/// The single completion shape returned by every gateway variant.
#[derive(Debug, Clone)]
pub struct ModelResponse {
    pub text: String,
    pub backend: Backend,
}

/// The gateway trait. Implement this to add a backend without touching the
/// orchestrator or any prompt code.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<ModelResponse, PipelineError>;

    /// Short human-readable identifier for logs and the output header.
    fn describe(&self) -> String;
}

/// Builds the configured gateway. Fails fast with `Auth` when the remote
/// backend is selected without a credential.
pub fn build_gateway(
    config: &Config,
    backend: BackendKind,
) -> Result<Arc<dyn ModelGateway>, PipelineError> {
    match backend {
        BackendKind::Remote => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or_else(|| PipelineError::Auth("OPENAI_API_KEY is not set".to_string()))?;
            Ok(Arc::new(OpenAiGateway::new(
                api_key,
                config.openai_model.clone(),
            )))
        }
        BackendKind::Local => Ok(Arc::new(OllamaGateway::new(
            config.ollama_base_url.clone(),
            config.ollama_model.clone(),
        ))),
    }
}

#[cfg(test)]
pub mod mock {
    //! Canned-response gateway for orchestrator and end-to-end tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MockGateway {
        responses: Mutex<VecDeque<Result<String, PipelineError>>>,
    }

    impl MockGateway {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push_text(&self, text: impl Into<String>) {
            self.responses.lock().unwrap().push_back(Ok(text.into()));
        }

        pub fn push_error(&self, err: PipelineError) {
            self.responses.lock().unwrap().push_back(Err(err));
        }
    }

    #[async_trait]
    impl ModelGateway for MockGateway {
        async fn complete(&self, _prompt: &str) -> Result<ModelResponse, PipelineError> {
            let next = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok("mock response".to_string()));
            next.map(|text| ModelResponse {
                text,
                backend: Backend::Local,
            })
        }

        fn describe(&self) -> String {
            "mock".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockGateway;
    use super::*;

    #[tokio::test]
    async fn test_gateway_returns_stubbed_text_verbatim() {
        let gateway = MockGateway::new();
        gateway.push_text("Findings are unremarkable.");

        let response = gateway.complete("any prompt").await.unwrap();
        assert_eq!(response.text, "Findings are unremarkable.");
    }

    #[tokio::test]
    async fn test_gateway_is_usable_through_trait_object() {
        let gateway: Arc<dyn ModelGateway> = Arc::new(MockGateway::new());
        let response = gateway.complete("prompt").await.unwrap();
        assert!(!response.text.is_empty());
    }

    #[test]
    fn test_remote_backend_without_credential_is_auth_error() {
        let config = Config {
            backend: BackendKind::Remote,
            openai_api_key: None,
            openai_model: "gpt-4o".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.1:8b".to_string(),
            radiology_context_path: "ajnr.md".into(),
            care_context_path: "acp_guidelines.md".into(),
            rust_log: "info".to_string(),
        };

        let result = build_gateway(&config, BackendKind::Remote);
        assert!(matches!(result, Err(PipelineError::Auth(_))));
    }

    #[test]
    fn test_local_backend_needs_no_credential() {
        let config = Config {
            backend: BackendKind::Local,
            openai_api_key: None,
            openai_model: "gpt-4o".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.1:8b".to_string(),
            radiology_context_path: "ajnr.md".into(),
            care_context_path: "acp_guidelines.md".into(),
            rust_log: "info".to_string(),
        };

        assert!(build_gateway(&config, BackendKind::Local).is_ok());
    }
}
