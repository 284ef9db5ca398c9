//! Filesystem helpers: safe filenames and output directories.

use std::path::{Path, PathBuf};

use chrono::Local;
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::error::Web2JsonError;

/// Maximum generated filename length, extension included.
pub const MAX_FILENAME_LENGTH: usize = 220;

/// Length cap for each URL-derived filename component.
const MAX_URL_COMPONENT_LENGTH: usize = 30;

/// Sanitize a filename for safe cross-platform use.
///
/// Replaces reserved characters, collapses underscore runs, strips leading
/// and trailing dots, and caps the length while keeping the extension.
pub fn sanitize_filename(filename: &str) -> String {
    let name = filename.trim();
    if name.is_empty() {
        return "unnamed_file".to_string();
    }

    // Windows superset of reserved characters, applied everywhere so
    // generated names travel between platforms.
    let mut out: String = name
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c if (c as u32) < 0x20 => '_',
            c => c,
        })
        .collect();

    while out.contains("__") {
        out = out.replace("__", "_");
    }
    let out = out.trim_matches('.').trim().to_string();

    if out.is_empty() {
        return "unnamed_file".to_string();
    }

    if out.len() > MAX_FILENAME_LENGTH {
        return truncate_keeping_extension(&out, MAX_FILENAME_LENGTH);
    }
    out
}

// The budget is in bytes; the cut falls back to the nearest char boundary.
fn truncate_keeping_extension(name: &str, max_len: usize) -> String {
    let (base, ext) = match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    };
    let mut end = max_len.saturating_sub(ext.len()).min(base.len());
    while !base.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}{ext}", &base[..end])
}

/// Generate an output filename from a URL: `domain_path_timestamp.json`.
pub fn generate_filename(url: &str) -> Result<String, Web2JsonError> {
    let parsed = Url::parse(url).map_err(|_| Web2JsonError::InvalidUrl(url.to_string()))?;

    let mut domain = parsed.host_str().unwrap_or("unknown").to_lowercase();
    if domain.starts_with("www.") {
        domain.drain(..4);
    }
    let mut domain = domain.replace('.', "_");
    domain.truncate(MAX_URL_COMPONENT_LENGTH);

    let path = parsed.path().trim_matches('/');
    let path = if path.is_empty() {
        "home".to_string()
    } else {
        let ext_re = Regex::new(r"(?i)\.(html|htm|php|asp|aspx|jsp)$").unwrap();
        let mut path = ext_re.replace(path, "").replace('/', "_");
        path = path.trim_matches('_').to_string();
        path.truncate(MAX_URL_COMPONENT_LENGTH);
        path
    };

    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let filename = sanitize_filename(&format!("{domain}_{path}_{timestamp}"));

    // Leave room for the extension.
    let filename = truncate_keeping_extension(&filename, MAX_FILENAME_LENGTH - 5);
    debug!("Generated filename: {filename}.json for URL: {url}");
    Ok(format!("{filename}.json"))
}

/// Ensure a directory exists and is writable, creating it if necessary.
pub fn ensure_directory(directory: &Path) -> Result<PathBuf, Web2JsonError> {
    if directory.as_os_str().is_empty() {
        return Err(Web2JsonError::Path(
            "Directory path cannot be empty".to_string(),
        ));
    }

    if directory.exists() && !directory.is_dir() {
        return Err(Web2JsonError::Path(format!(
            "Path exists but is not a directory: {}",
            directory.display()
        )));
    }

    std::fs::create_dir_all(directory).map_err(|e| {
        Web2JsonError::Path(format!(
            "Failed to create directory {}: {e}",
            directory.display()
        ))
    })?;

    let metadata = std::fs::metadata(directory).map_err(|e| {
        Web2JsonError::Path(format!(
            "Failed to inspect directory {}: {e}",
            directory.display()
        ))
    })?;
    if metadata.permissions().readonly() {
        return Err(Web2JsonError::Path(format!(
            "Directory is not writable: {}",
            directory.display()
        )));
    }

    Ok(directory.to_path_buf())
}
