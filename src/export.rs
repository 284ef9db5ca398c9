//! Document export to JSON files.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Web2JsonError;
use crate::models::Document;
use crate::utils::fs::{ensure_directory, generate_filename, sanitize_filename};

/// Resolve the output path for a document.
///
/// An explicit basename wins; otherwise the filename is generated from the
/// URL. Either way the file lands inside `output_dir`.
pub fn resolve_output_path(
    url: &str,
    output_name: Option<&str>,
    output_dir: &Path,
) -> Result<PathBuf, Web2JsonError> {
    let filename = match output_name {
        Some(name) => {
            let name = sanitize_filename(name);
            if name.ends_with(".json") {
                name
            } else {
                format!("{name}.json")
            }
        }
        None => generate_filename(url)?,
    };
    Ok(output_dir.join(filename))
}

/// Serialize a document to pretty JSON and write it to `path`.
pub fn export_document(document: &Document, path: &Path) -> Result<PathBuf, Web2JsonError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let json = document.to_json()?;
    std::fs::write(path, json.as_bytes())
        .map_err(|e| Web2JsonError::Export(format!("Failed to write {}: {e}", path.display())))?;

    debug!("Exported document to {}", path.display());
    Ok(path.to_path_buf())
}
