//! Style-aware text extraction from HTML elements.

use scraper::{ElementRef, Node};

/// Inline tags kept as markup when styles are preserved.
pub const STYLE_TAGS: &[&str] = &[
    "b", "strong", "i", "em", "sup", "sub", "u", "mark", "small", "s", "del", "ins", "abbr",
    "cite", "q", "dfn", "time", "code", "var", "samp", "kbd",
];

/// Is this tag an inline style tag?
pub fn is_style_tag(name: &str) -> bool {
    STYLE_TAGS.contains(&name)
}

/// Extract text from an element, normalizing whitespace.
///
/// With `preserve_styles`, inline style tags (see [`STYLE_TAGS`]) are kept
/// as markup in the output; `<span>` is always unwrapped. All other tags
/// are unwrapped to their text content.
pub fn element_text(element: ElementRef, preserve_styles: bool) -> String {
    let mut out = String::new();
    collect_text(element, preserve_styles, &mut out);
    normalize_whitespace(&out)
}

fn collect_text(element: ElementRef, preserve_styles: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.value().name();
                if preserve_styles && is_style_tag(name) {
                    push_open_tag(el, out);
                    collect_text(el, preserve_styles, out);
                    out.push_str(&format!("</{name}>"));
                } else {
                    collect_text(el, preserve_styles, out);
                }
            }
            _ => {}
        }
    }
}

fn push_open_tag(element: ElementRef, out: &mut String) {
    out.push('<');
    out.push_str(element.value().name());
    for (name, value) in element.value().attrs() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(value);
        out.push('"');
    }
    out.push('>');
}

/// Render an element as inline markup: open tag (with attributes), its
/// style-processed inner text, close tag. Used for preserved style tags.
pub fn render_inline(element: ElementRef, preserve_styles: bool) -> String {
    let mut out = String::new();
    push_open_tag(element, &mut out);
    collect_text(element, preserve_styles, &mut out);
    out.push_str(&format!("</{}>", element.value().name()));
    out
}

/// Raw text of an element and its descendants, line breaks intact.
pub fn raw_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Collapse all whitespace runs to single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(doc: &'a Html, selector: &str) -> ElementRef<'a> {
        let sel = Selector::parse(selector).unwrap();
        doc.select(&sel).next().expect("fixture element")
    }

    #[test]
    fn test_plain_text_strips_all_tags() {
        let doc = Html::parse_document("<p>Some <b>bold</b> and <i>italic</i> text</p>");
        assert_eq!(
            element_text(first(&doc, "p"), false),
            "Some bold and italic text"
        );
    }

    #[test]
    fn test_preserve_styles_keeps_style_tags() {
        let doc = Html::parse_document("<p>Some <b>bold</b> text</p>");
        assert_eq!(
            element_text(first(&doc, "p"), true),
            "Some <b>bold</b> text"
        );
    }

    #[test]
    fn test_spans_always_unwrapped() {
        let doc = Html::parse_document(r#"<p><span class="x">wrapped</span> tail</p>"#);
        assert_eq!(element_text(first(&doc, "p"), true), "wrapped tail");
        assert_eq!(element_text(first(&doc, "p"), false), "wrapped tail");
    }

    #[test]
    fn test_preserved_tag_keeps_attributes() {
        let doc = Html::parse_document(r#"<p><abbr title="HyperText">HT</abbr></p>"#);
        assert_eq!(
            element_text(first(&doc, "p"), true),
            r#"<abbr title="HyperText">HT</abbr>"#
        );
    }

    #[test]
    fn test_whitespace_normalized() {
        let doc = Html::parse_document("<p>  spaced\n\t out   text </p>");
        assert_eq!(element_text(first(&doc, "p"), false), "spaced out text");
    }

    #[test]
    fn test_raw_text_preserves_line_breaks() {
        let doc = Html::parse_document("<pre>line one\nline two</pre>");
        assert_eq!(raw_text(first(&doc, "pre")), "line one\nline two");
    }
}
