//! URL validation and normalization.

use tracing::debug;
use url::Url;

use crate::error::Web2JsonError;

/// Maximum accepted URL length.
pub const MAX_URL_LENGTH: usize = 2048;

/// Validate URL format and scheme (http/https with a host).
pub fn validate_url(url: &str) -> bool {
    if url.is_empty() {
        debug!("URL cannot be empty");
        return false;
    }
    if url.len() > MAX_URL_LENGTH {
        debug!("URL exceeds maximum length of {MAX_URL_LENGTH} characters");
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(e) => {
            debug!("URL parsing error: {e}");
            false
        }
    }
}

/// Normalize a URL, optionally resolving it against a base URL first.
///
/// Lowercases scheme and host (done by the parser), drops the fragment and
/// trims a trailing slash from non-root paths.
pub fn normalize_url(url: &str, base_url: Option<&str>) -> Result<String, Web2JsonError> {
    let resolved = if !url.starts_with("http://") && !url.starts_with("https://") {
        let base = base_url
            .ok_or_else(|| Web2JsonError::InvalidUrl(url.to_string()))?;
        let base = Url::parse(base)
            .map_err(|_| Web2JsonError::InvalidUrl(base.to_string()))?;
        base.join(url)
            .map_err(|_| Web2JsonError::InvalidUrl(url.to_string()))?
    } else {
        Url::parse(url).map_err(|_| Web2JsonError::InvalidUrl(url.to_string()))?
    };

    if !validate_url(resolved.as_str()) {
        return Err(Web2JsonError::InvalidUrl(resolved.to_string()));
    }

    let mut normalized = resolved;
    normalized.set_fragment(None);

    let mut out = normalized.to_string();
    if out.ends_with('/') && normalized.path().len() > 1 {
        out.pop();
    }
    Ok(out)
}

/// Extract the host from a URL.
pub fn extract_domain(url: &str) -> Result<String, Web2JsonError> {
    if !validate_url(url) {
        return Err(Web2JsonError::InvalidUrl(url.to_string()));
    }
    let parsed = Url::parse(url).map_err(|_| Web2JsonError::InvalidUrl(url.to_string()))?;
    Ok(parsed.host_str().unwrap_or_default().to_string())
}
