//! Error types for web2json.

use thiserror::Error;

/// Errors that can occur while converting a page to JSON.
#[derive(Debug, Error)]
pub enum Web2JsonError {
    /// URL failed validation before any network activity.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Fetching the page failed (connection, timeout, HTTP status, ...).
    #[error("{0}")]
    Fetch(String),

    /// The HTML could not be parsed into a document.
    #[error("Failed to parse HTML content: {0}")]
    Parse(String),

    /// Structured content could not be extracted from the document.
    #[error("Failed to extract content: {0}")]
    Extract(String),

    /// The document could not be serialized or written out.
    #[error("Failed to export document: {0}")]
    Export(String),

    /// Output path or filename problems.
    #[error("{0}")]
    Path(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Web2JsonError {
    /// Map a reqwest error onto the fetch error taxonomy, keeping the
    /// distinct failure modes visible in user-facing messages.
    pub fn from_fetch(err: reqwest::Error, url: &str, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Fetch(format!(
                "Timeout error: Request to {url} timed out after {timeout_secs}s"
            ))
        } else if err.is_connect() {
            Self::Fetch(format!("Connection error: Failed to connect to {url}"))
        } else if err.is_redirect() {
            Self::Fetch(format!(
                "Too many redirects: Maximum redirect limit reached for {url}"
            ))
        } else if let Some(status) = err.status() {
            Self::Fetch(format!(
                "HTTP error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            ))
        } else {
            Self::Fetch(format!("Unexpected error fetching {url}: {err}"))
        }
    }
}
