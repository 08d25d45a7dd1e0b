use std::path::PathBuf;

use anyhow::Result;
use clap::ValueEnum;

/// Which model backend serves completion calls.
///
/// Selected once at startup and passed into the orchestrator — never a
/// process-wide toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Hosted chat-completions API (requires OPENAI_API_KEY).
    Remote,
    /// Ollama server on the local machine.
    Local,
}

/// Application configuration loaded from environment variables.
/// Optional values fall back to the defaults the pipeline shipped with.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    /// Radiology reference text injected into the diagnosis prompt.
    pub radiology_context_path: PathBuf,
    /// Clinical care guidelines injected into the care-plan prompt.
    pub care_context_path: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let backend = match std::env::var("MODEL_BACKEND") {
            Ok(v) => parse_backend(&v)?,
            Err(_) => BackendKind::Local,
        };

        Ok(Config {
            backend,
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            ollama_model: std::env::var("OLLAMA_MODEL")
                .unwrap_or_else(|_| "llama3.1:8b".to_string()),
            radiology_context_path: std::env::var("RADIOLOGY_CONTEXT_PATH")
                .unwrap_or_else(|_| "ajnr.md".to_string())
                .into(),
            care_context_path: std::env::var("CARE_GUIDELINES_PATH")
                .unwrap_or_else(|_| "acp_guidelines.md".to_string())
                .into(),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn parse_backend(value: &str) -> Result<BackendKind> {
    match value.to_ascii_lowercase().as_str() {
        "remote" => Ok(BackendKind::Remote),
        "local" => Ok(BackendKind::Local),
        other => Err(anyhow::anyhow!(
            "MODEL_BACKEND must be 'remote' or 'local', got '{other}'"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_accepts_both_kinds() {
        assert_eq!(parse_backend("remote").unwrap(), BackendKind::Remote);
        assert_eq!(parse_backend("local").unwrap(), BackendKind::Local);
        assert_eq!(parse_backend("LOCAL").unwrap(), BackendKind::Local);
    }

    #[test]
    fn test_parse_backend_rejects_unknown() {
        assert!(parse_backend("cloud").is_err());
    }
}
