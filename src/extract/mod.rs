//! Structured content extraction from parsed HTML.
//!
//! The extractor walks the document tree in document order, emitting one
//! [`ContentItem`] per structural element. Container elements (div, main,
//! article, ...) are descended through; structural elements own their
//! subtree, so nothing inside them is re-emitted at top level.

mod code;
mod content;
mod lists;
mod sections;
mod tables;
mod text;

pub use code::detect_language;
pub use content::find_content_scope;
pub use sections::organize_sections;
pub use text::{element_text, normalize_whitespace, STYLE_TAGS};

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::ContentItem;

/// Extraction settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Keep inline style tags as markup in text content.
    pub preserve_styles: bool,
    /// Nest the output under headings into section items.
    pub organize_sections: bool,
}

/// Elements whose content is never extracted.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template", "head", "svg", "iframe"];

/// Extract all structured content from a document.
///
/// Extraction is scoped to the detected main content container when one
/// exists; otherwise the whole body is walked. Chrome elements (nav,
/// header, footer, sidebars) are excluded either way.
pub fn extract_content(doc: &Html, opts: ExtractOptions) -> Vec<ContentItem> {
    let body_sel = Selector::parse("body").unwrap();
    let mut items = Vec::new();

    let body = doc
        .select(&body_sel)
        .next()
        .unwrap_or_else(|| doc.root_element());
    let scope = content::find_content_scope(doc).unwrap_or(body);
    walk(scope, opts, &mut items);

    // A detected container can turn out to hold nothing extractable;
    // rescan the whole body rather than return an empty document.
    if items.is_empty() && scope.id() != body.id() {
        debug!("Detected content scope was empty, rescanning body");
        walk(body, opts, &mut items);
    }

    debug!("Extracted {} content items", items.len());

    if opts.organize_sections {
        sections::organize_sections(items)
    } else {
        items
    }
}

fn walk(element: ElementRef, opts: ExtractOptions, out: &mut Vec<ContentItem>) {
    for child in element.children() {
        let Some(el) = ElementRef::wrap(child) else {
            continue;
        };
        if content::is_non_content(el) {
            continue;
        }
        let name = el.value().name();

        match name {
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                out.push(ContentItem::Heading {
                    level: heading_level(name),
                    text: text::element_text(el, opts.preserve_styles),
                });
            }
            "p" => {
                let text = text::element_text(el, opts.preserve_styles);
                if !text.is_empty() {
                    out.push(ContentItem::Paragraph { text });
                }
            }
            "blockquote" => {
                out.push(ContentItem::Blockquote {
                    text: text::element_text(el, opts.preserve_styles),
                });
            }
            "ul" | "ol" => {
                out.push(lists::extract_list(el, opts.preserve_styles));
            }
            "pre" => {
                if let Some(item) = code::extract_code_block(el, None) {
                    out.push(item);
                }
            }
            "table" => {
                if let Some(item) = tables::extract_table(el, opts.preserve_styles) {
                    out.push(item);
                }
            }
            "img" => {
                if let Some(item) = extract_image(el, None) {
                    out.push(item);
                }
            }
            "figure" => {
                if let Some(item) = extract_figure(el, opts) {
                    out.push(item);
                } else {
                    walk(el, opts, out);
                }
            }
            _ if SKIP_TAGS.contains(&name) => {}
            // Containers and unknown elements: keep walking.
            _ => walk(el, opts, out),
        }
    }
}

fn heading_level(name: &str) -> u8 {
    name.as_bytes()
        .get(1)
        .map(|&b| b.saturating_sub(b'0').clamp(1, 6))
        .unwrap_or(1)
}

/// Extract an `<img>`. Images with no usable `src` are skipped.
fn extract_image(img: ElementRef, caption: Option<String>) -> Option<ContentItem> {
    let src = img.value().attr("src")?.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }

    let alt = img
        .value()
        .attr("alt")
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from);

    Some(ContentItem::Image {
        src: src.to_string(),
        alt,
        caption,
    })
}

/// A figure wrapping an image or code block contributes its figcaption as
/// the caption. Other figures fall back to a normal container walk.
fn extract_figure(figure: ElementRef, opts: ExtractOptions) -> Option<ContentItem> {
    let figcaption_sel = Selector::parse("figcaption").unwrap();
    let img_sel = Selector::parse("img").unwrap();
    let pre_sel = Selector::parse("pre").unwrap();

    let caption = figure
        .select(&figcaption_sel)
        .next()
        .map(|c| text::element_text(c, opts.preserve_styles))
        .filter(|c| !c.is_empty());

    if let Some(img) = figure.select(&img_sel).next() {
        return extract_image(img, caption);
    }
    if let Some(pre) = figure.select(&pre_sel).next() {
        return code::extract_code_block(pre, caption);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ListType;

    fn extract(html: &str) -> Vec<ContentItem> {
        let doc = Html::parse_document(html);
        extract_content(&doc, ExtractOptions::default())
    }

    #[test]
    fn test_document_order_preserved() {
        let items = extract(
            "<body><h1>Title</h1><p>first</p><ul><li>a</li></ul><p>second</p></body>",
        );
        let tags: Vec<&str> = items.iter().map(|i| i.type_name()).collect();
        assert_eq!(tags, vec!["heading", "paragraph", "list", "paragraph"]);
    }

    #[test]
    fn test_nested_content_not_duplicated() {
        // The paragraph inside the blockquote and the list inside the li
        // must not appear as separate top-level items.
        let items = extract(
            "<body><blockquote><p>quoted</p></blockquote>\
             <ul><li>outer<ul><li>inner</li></ul></li></ul></body>",
        );
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].type_name(), "blockquote");
        assert_eq!(items[1].type_name(), "list");
    }

    #[test]
    fn test_content_inside_containers_found() {
        let items = extract(
            "<body><main><article><div><p>deep</p></div></article></main></body>",
        );
        assert_eq!(items.len(), 1);
        match &items[0] {
            ContentItem::Paragraph { text } => assert_eq!(text, "deep"),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_script_and_style_skipped() {
        let items = extract(
            "<body><script>var x;</script><style>p{}</style><p>real</p></body>",
        );
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_empty_paragraphs_skipped() {
        let items = extract("<body><p>  </p><p>kept</p></body>");
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_heading_levels() {
        let items = extract("<body><h2>two</h2><h6>six</h6></body>");
        match (&items[0], &items[1]) {
            (
                ContentItem::Heading { level: a, .. },
                ContentItem::Heading { level: b, .. },
            ) => {
                assert_eq!((*a, *b), (2, 6));
            }
            other => panic!("expected headings, got {other:?}"),
        }
    }

    #[test]
    fn test_figure_image_with_caption() {
        let items = extract(
            r#"<body><figure><img src="/chart.png" alt="Chart">
               <figcaption>Quarterly numbers</figcaption></figure></body>"#,
        );
        assert_eq!(items.len(), 1);
        match &items[0] {
            ContentItem::Image { src, alt, caption } => {
                assert_eq!(src, "/chart.png");
                assert_eq!(alt.as_deref(), Some("Chart"));
                assert_eq!(caption.as_deref(), Some("Quarterly numbers"));
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_data_uri_images_skipped() {
        let items = extract(r#"<body><img src="data:image/png;base64,AAAA"></body>"#);
        assert!(items.is_empty());
    }

    #[test]
    fn test_figure_code_block_with_caption() {
        let items = extract(
            r#"<body><figure><figcaption>Example</figcaption>
               <pre><code class="language-rust">let a = 1;</code></pre></figure></body>"#,
        );
        match &items[0] {
            ContentItem::CodeBlock {
                language, caption, ..
            } => {
                assert_eq!(language.as_deref(), Some("rust"));
                assert_eq!(caption.as_deref(), Some("Example"));
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_sections_option() {
        let doc = Html::parse_document(
            "<body><h1>Top</h1><p>intro</p><h2>Sub</h2><p>detail</p></body>",
        );
        let items = extract_content(
            &doc,
            ExtractOptions {
                preserve_styles: false,
                organize_sections: true,
            },
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].type_name(), "section");
    }

    #[test]
    fn test_page_chrome_excluded() {
        let items = extract(
            r#"<body>
               <nav><ul><li><a href="/">Home</a></li><li><a href="/about">About</a></li></ul></nav>
               <main><p>Real article text.</p></main>
               <footer><p>Copyright 2026 Example Corp.</p></footer>
               </body>"#,
        );
        assert_eq!(items.len(), 1);
        match &items[0] {
            ContentItem::Paragraph { text } => assert_eq!(text, "Real article text."),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_sidebar_class_excluded() {
        let items = extract(
            r#"<body><div class="sidebar"><p>Trending posts</p></div><p>Body text</p></body>"#,
        );
        assert_eq!(items.len(), 1);
        match &items[0] {
            ContentItem::Paragraph { text } => assert_eq!(text, "Body text"),
            other => panic!("expected paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_scope_falls_back_to_body() {
        let items = extract("<body><main></main><p>outside the container</p></body>");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].type_name(), "paragraph");
    }

    #[test]
    fn test_ordered_list_extracted() {
        let items = extract("<body><ol><li>one</li></ol></body>");
        match &items[0] {
            ContentItem::List { list_type, .. } => assert_eq!(*list_type, ListType::Ordered),
            other => panic!("expected list, got {other:?}"),
        }
    }
}
