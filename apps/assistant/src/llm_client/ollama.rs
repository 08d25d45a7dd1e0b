//! Local backend — Ollama `/api/generate`.
//!
//! Completions can take a while on consumer hardware, so the client waits
//! up to two minutes before treating the call as timed out. The `/api/tags`
//! endpoint answers quickly and gets a short timeout of its own.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::PipelineError;
use crate::llm_client::{Backend, ModelGateway, ModelResponse};

const GENERATE_TIMEOUT_SECS: u64 = 120;
const TAGS_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f64,
    top_p: f64,
    max_tokens: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 2000,
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagEntry>,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
}

pub struct OllamaGateway {
    http: Client,
    tags_http: Client,
    base_url: String,
    model: String,
}

impl OllamaGateway {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            http: Client::builder()
                .timeout(std::time::Duration::from_secs(GENERATE_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            tags_http: Client::builder()
                .timeout(std::time::Duration::from_secs(TAGS_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// Lists the model identifiers the local server has available.
    pub async fn list_models(&self) -> Result<Vec<String>, PipelineError> {
        let response = self
            .tags_http
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(|e| PipelineError::from_http(e, TAGS_TIMEOUT_SECS))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Backend(format!(
                "tags endpoint returned {status}"
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Backend(format!("unreadable tags body: {e}")))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[async_trait]
impl ModelGateway for OllamaGateway {
    async fn complete(&self, prompt: &str) -> Result<ModelResponse, PipelineError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions::default(),
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&request_body)
            .send()
            .await
            .map_err(|e| PipelineError::from_http(e, GENERATE_TIMEOUT_SECS))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::Backend(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::Backend(format!("unreadable generate body: {e}")))?;

        debug!("local completion received ({} chars)", generated.response.len());

        Ok(ModelResponse {
            text: generated.response,
            backend: Backend::Local,
        })
    }

    fn describe(&self) -> String {
        format!("local ({})", self.model)
    }
}
