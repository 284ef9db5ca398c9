//! HTML parsing and page-level metadata extraction.

use std::collections::BTreeMap;

use scraper::{Html, Selector};
use tracing::debug;

use crate::models::DEFAULT_TITLE;

/// Parse an HTML string into a document tree.
pub fn parse_document(html: &str) -> Html {
    Html::parse_document(html)
}

/// Extract the page title.
///
/// Precedence: first `<h1>` direct text, then the `og:title` meta tag,
/// then `<title>`, falling back to `"No Title"`.
pub fn extract_title(doc: &Html) -> String {
    let h1 = Selector::parse("h1").unwrap();
    if let Some(heading) = doc.select(&h1).next() {
        // Direct text nodes only: a nested <a> or <span> label is the link's
        // text, not necessarily the page title.
        let mut title = String::new();
        for child in heading.children() {
            if let Some(text) = child.value().as_text() {
                title.push_str(text);
            }
        }
        let title = title.trim().to_string();
        if !title.is_empty() {
            debug!("Found title in h1: {title}");
            return title;
        }
    }

    let og_title = Selector::parse(r#"meta[property="og:title"]"#).unwrap();
    if let Some(meta) = doc.select(&og_title).next() {
        if let Some(content) = meta.value().attr("content") {
            if !content.trim().is_empty() {
                debug!("Found title in og:title: {content}");
                return content.to_string();
            }
        }
    }

    let title_tag = Selector::parse("title").unwrap();
    if let Some(title) = doc.select(&title_tag).next() {
        let text = title.text().collect::<String>().trim().to_string();
        if !text.is_empty() {
            debug!("Found title in title tag: {text}");
            return text;
        }
    }

    debug!("No title found, using default");
    DEFAULT_TITLE.to_string()
}

/// Extract `<meta>` tags with a (`name` or `property`) + `content` pair.
pub fn extract_meta_tags(doc: &Html) -> BTreeMap<String, String> {
    let meta = Selector::parse("meta").unwrap();
    let mut tags = BTreeMap::new();

    for element in doc.select(&meta) {
        let value = element.value();
        let name = value.attr("name").or_else(|| value.attr("property"));
        if let (Some(name), Some(content)) = (name, value.attr("content")) {
            tags.insert(name.to_string(), content.to_string());
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_from_h1() {
        let doc = parse_document("<html><head><title>T</title></head><body><h1>Main Heading</h1></body></html>");
        assert_eq!(extract_title(&doc), "Main Heading");
    }

    #[test]
    fn test_title_ignores_nested_markup_in_h1() {
        let doc = parse_document("<h1><span>Styled</span> Heading</h1>");
        assert_eq!(extract_title(&doc), "Heading");
    }

    #[test]
    fn test_title_from_og_title_when_h1_empty() {
        let doc = parse_document(
            r#"<head><meta property="og:title" content="OG Title"><title>Tag</title></head><body><h1><b>x</b></h1></body>"#,
        );
        assert_eq!(extract_title(&doc), "OG Title");
    }

    #[test]
    fn test_title_from_title_tag() {
        let doc = parse_document("<head><title> Tag Title </title></head><body><p>x</p></body>");
        assert_eq!(extract_title(&doc), "Tag Title");
    }

    #[test]
    fn test_title_default() {
        let doc = parse_document("<body><p>no titles here</p></body>");
        assert_eq!(extract_title(&doc), "No Title");
    }

    #[test]
    fn test_meta_tags() {
        let doc = parse_document(
            r#"<head>
                <meta name="description" content="A page">
                <meta property="og:site_name" content="Example">
                <meta charset="utf-8">
            </head>"#,
        );
        let tags = extract_meta_tags(&doc);
        assert_eq!(tags.get("description").map(String::as_str), Some("A page"));
        assert_eq!(tags.get("og:site_name").map(String::as_str), Some("Example"));
        assert_eq!(tags.len(), 2);
    }
}
