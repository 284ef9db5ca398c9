//! Asynchronous page fetching.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::Web2JsonError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default user agent: a current desktop browser, since many sites serve
/// reduced markup to unknown clients.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// HTTP client for fetching pages as text.
#[derive(Clone)]
pub struct FetchClient {
    client: Client,
    timeout_secs: u64,
}

impl FetchClient {
    /// Create a client with the default user agent.
    pub fn new(timeout: Duration) -> Result<Self, Web2JsonError> {
        Self::with_user_agent(timeout, None)
    }

    /// Create a client with a custom user agent string.
    pub fn with_user_agent(
        timeout: Duration,
        user_agent: Option<&str>,
    ) -> Result<Self, Web2JsonError> {
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(USER_AGENT))
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| Web2JsonError::Fetch(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }

    /// Fetch a URL and return the response body as text.
    pub async fn fetch_text(&self, url: &str) -> Result<String, Web2JsonError> {
        debug!("Sending GET request to {url}");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .send()
            .await
            .map_err(|e| Web2JsonError::from_fetch(e, url, self.timeout_secs))?;

        debug!("Received response: HTTP {}", response.status());

        let response = response
            .error_for_status()
            .map_err(|e| Web2JsonError::from_fetch(e, url, self.timeout_secs))?;

        let content = response
            .text()
            .await
            .map_err(|e| Web2JsonError::from_fetch(e, url, self.timeout_secs))?;

        debug!("Fetched {} bytes", content.len());
        Ok(content)
    }
}
