use thiserror::Error;

/// Application-level error type.
///
/// Extraction and per-report pipeline failures are caught at the report
/// boundary by the batch runner; `Auth` and configuration errors are fatal
/// at startup.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no usable text extracted from {path}")]
    Extraction { path: String },

    #[error("missing credential: {0}")]
    Auth(String),

    #[error("backend error: {0}")]
    Backend(String),

    #[error("backend timed out after {0}s")]
    Timeout(u64),

    #[error("no well-formed report sections found in {0}")]
    MalformedInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Maps a reqwest transport error onto the pipeline taxonomy.
    /// Timeouts are distinguished so callers can report the wait bound.
    pub fn from_http(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            PipelineError::Timeout(timeout_secs)
        } else {
            PipelineError::Backend(err.to_string())
        }
    }
}
