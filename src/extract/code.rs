//! Code block extraction with language detection.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::text::raw_text;
use crate::models::ContentItem;

/// Class attribute patterns that carry a language name.
fn language_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"language-(\w+)",
            r"lang-(\w+)",
            r"syntax-(\w+)",
            r"brush:\s*(\w+)",
            r"(\w+)-syntax",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

/// Extract a `<pre>` element into a code block, with optional caption
/// (from an enclosing figure's figcaption).
pub fn extract_code_block(
    pre: ElementRef,
    caption: Option<String>,
) -> Option<ContentItem> {
    let code_sel = Selector::parse("code").unwrap();
    let inner_code = pre.select(&code_sel).next();

    // Text comes from the inner <code> when present; highlighter wrappers
    // often put line-number gutters directly under <pre>.
    let text = raw_text(inner_code.unwrap_or(pre));
    if text.is_empty() {
        return None;
    }

    let language = detect_language(pre).or_else(|| inner_code.and_then(detect_language));

    Some(ContentItem::CodeBlock {
        language,
        caption,
        text,
    })
}

/// Detect the language from an element's class attribute.
pub fn detect_language(element: ElementRef) -> Option<String> {
    let class_attr = element.value().attr("class")?;
    for pattern in language_patterns() {
        if let Some(captures) = pattern.captures(class_attr) {
            let lang = captures.get(1)?.as_str().to_lowercase();
            // Generic markers carry no information.
            if lang != "plaintext" && lang != "text" && lang != "none" {
                return Some(lang);
            }
        }
    }
    None
}
