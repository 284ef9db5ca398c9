//! Document model: the top-level JSON output shape.

use std::collections::BTreeMap;

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::error::Web2JsonError;
use crate::models::ContentItem;

/// Fallback title when a page has no usable one.
pub const DEFAULT_TITLE: &str = "No Title";

/// Document metadata: where and how the content was acquired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Source URL.
    pub url: String,
    /// Local timestamp of the fetch, `YYYY-MM-DD HH:MM:SS`.
    pub fetched_at: String,
    /// Whether inline HTML style tags were preserved in text content.
    pub preserve_styles: bool,
    /// Values of the page's `<meta>` tags, if any.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meta: Option<BTreeMap<String, String>>,
}

impl Metadata {
    /// Create metadata stamped with the current local time.
    pub fn new(url: impl Into<String>, preserve_styles: bool) -> Self {
        Self {
            url: url.into(),
            fetched_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            preserve_styles,
            meta: None,
        }
    }

    /// Attach meta tag values, dropping the field entirely when empty.
    pub fn with_meta(mut self, meta: BTreeMap<String, String>) -> Self {
        self.meta = if meta.is_empty() { None } else { Some(meta) };
        self
    }
}

/// A converted web page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub content: Vec<ContentItem>,
    pub metadata: Metadata,
}

impl Document {
    /// Build a document, normalizing blank titles to [`DEFAULT_TITLE`].
    pub fn new(title: impl Into<String>, content: Vec<ContentItem>, metadata: Metadata) -> Self {
        let title = title.into();
        let title = if title.trim().is_empty() {
            DEFAULT_TITLE.to_string()
        } else {
            title
        };
        Self {
            title,
            content,
            metadata,
        }
    }

    /// Serialize to pretty-printed JSON (2-space indent, UTF-8 as-is).
    pub fn to_json(&self) -> Result<String, Web2JsonError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            Web2JsonError::Export(format!("Failed to serialize document to JSON: {e}"))
        })
    }

    /// Counts of content items by type tag, for run summaries.
    pub fn content_stats(&self) -> BTreeMap<&'static str, usize> {
        let mut stats = BTreeMap::new();
        for item in &self.content {
            *stats.entry(item.type_name()).or_insert(0) += 1;
        }
        stats
    }
}
