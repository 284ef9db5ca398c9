//! Main content detection.
//!
//! Real pages wrap the article body in navigation menus, headers, footers
//! and sidebars. Before extraction the document is scoped to the container
//! most likely to hold the actual content, and chrome elements are excluded
//! wherever they appear.

use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Tags that hold page chrome rather than content.
const NON_CONTENT_TAGS: &[&str] = &["nav", "header", "footer", "aside"];

/// ARIA roles marking page chrome.
const NON_CONTENT_ROLES: &[&str] = &["navigation", "banner", "contentinfo"];

/// Class/id tokens suggesting a content container.
fn content_class_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)(^|\s)(article|blog|post|entry|content|main|body|text|page)(\s|$)",
            r"(?i)(^|\s)(prose|markdown|md|doc|document|story|narrative)(\s|$)",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

/// Class/id tokens suggesting chrome (sidebars, menus, comment areas, ...).
fn non_content_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"(?i)(^|\s)(sidebar|widget|banner|ad|advertisement|promo|popup)(\s|$)",
            r"(?i)(^|\s)(menu|nav|footer|header|copyright|social|share|toolbar)(\s|$)",
            r"(?i)(^|\s)(comment|related|recommended|popular|trending)(\s|$)",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    })
}

fn attr_matches(element: ElementRef, patterns: &[Regex]) -> bool {
    ["class", "id"].into_iter().any(|attr| {
        element
            .value()
            .attr(attr)
            .is_some_and(|value| patterns.iter().any(|p| p.is_match(value)))
    })
}

/// Is this element page chrome (navigation, header, footer, sidebar)?
pub fn is_non_content(element: ElementRef) -> bool {
    let value = element.value();
    if NON_CONTENT_TAGS.contains(&value.name()) {
        return true;
    }
    if value
        .attr("role")
        .is_some_and(|role| NON_CONTENT_ROLES.contains(&role))
    {
        return true;
    }
    attr_matches(element, non_content_patterns())
}

/// Find the container most likely to hold the main content.
///
/// Candidates are semantic containers plus elements with content-like
/// class/id names; the highest-scoring one wins. Returns `None` when the
/// page offers no plausible candidate, in which case the caller walks the
/// whole body.
pub fn find_content_scope(doc: &Html) -> Option<ElementRef<'_>> {
    let semantic_sel =
        Selector::parse(r#"main, article, [role="main"], [role="article"]"#).unwrap();
    let attributed_sel = Selector::parse("[class], [id]").unwrap();

    let mut candidates: Vec<ElementRef> = doc.select(&semantic_sel).collect();
    for el in doc.select(&attributed_sel) {
        if candidates.iter().any(|c| c.id() == el.id()) {
            continue;
        }
        if attr_matches(el, content_class_patterns()) {
            candidates.push(el);
        }
    }

    let mut best: Option<(f64, ElementRef)> = None;
    for candidate in candidates {
        let score = score_candidate(candidate);
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, candidate));
        }
    }

    best.filter(|(score, _)| *score > 0.0).map(|(score, el)| {
        debug!("Content scope: <{}> (score {score:.1})", el.value().name());
        el
    })
}

/// Relevance score for a candidate container. Text volume, semantic tags
/// and content-like names raise it; chrome markers and link-heavy text
/// lower it.
fn score_candidate(element: ElementRef) -> f64 {
    let heading_sel = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    let p_sel = Selector::parse("p").unwrap();
    let block_sel = Selector::parse("ul, ol, blockquote, pre, table").unwrap();
    let link_sel = Selector::parse("a").unwrap();

    let text_len = text_length(element);
    let mut score = (text_len as f64 / 100.0).min(10.0);

    if matches!(element.value().name(), "main" | "article" | "section") {
        score += 5.0;
    }
    if attr_matches(element, content_class_patterns()) {
        score += 3.0;
    }
    if attr_matches(element, non_content_patterns()) {
        score -= 5.0;
    }

    score += element.select(&heading_sel).count() as f64 * 2.0;

    let paragraphs: Vec<ElementRef> = element.select(&p_sel).collect();
    if !paragraphs.is_empty() {
        let p_len: usize = paragraphs.iter().map(|p| text_length(*p)).sum();
        if p_len / paragraphs.len() > 40 {
            score += 3.0;
        }
        score += (paragraphs.len() as f64 / 2.0).min(5.0);
    }

    score += element.select(&block_sel).count() as f64 * 1.5;

    // Mostly-link text is navigation, not content.
    if text_len > 0 {
        let link_len: usize = element.select(&link_sel).map(text_length).sum();
        if link_len as f64 / text_len as f64 > 0.5 {
            score -= 4.0;
        }
    }

    score.max(0.0)
}

fn text_length(element: ElementRef) -> usize {
    element
        .text()
        .map(|t| t.split_whitespace().map(str::len).sum::<usize>())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_container_wins_over_chrome() {
        let doc = Html::parse_document(
            r#"<body><nav><a href="/">Home</a><a href="/about">About</a></nav>
               <main><p>The actual article text lives here and has some length.</p></main>
               </body>"#,
        );
        let scope = find_content_scope(&doc).expect("main detected");
        assert_eq!(scope.value().name(), "main");
    }

    #[test]
    fn test_content_class_candidate() {
        let doc = Html::parse_document(
            r#"<body><div class="content"><p>A reasonably long paragraph of body text
               sitting inside the content container.</p></div></body>"#,
        );
        let scope = find_content_scope(&doc).expect("content div detected");
        assert_eq!(scope.value().name(), "div");
    }

    #[test]
    fn test_plain_page_has_no_scope() {
        let doc = Html::parse_document("<body><p>bare page</p></body>");
        assert!(find_content_scope(&doc).is_none());
    }

    #[test]
    fn test_non_content_tags_and_roles() {
        let doc = Html::parse_document(
            r#"<body><nav>x</nav><div role="navigation">y</div>
               <div class="sidebar">z</div><p class="lead">kept</p></body>"#,
        );
        let sel = Selector::parse("body > *").unwrap();
        let flags: Vec<bool> = doc.select(&sel).map(is_non_content).collect();
        assert_eq!(flags, vec![true, true, true, false]);
    }

    #[test]
    fn test_class_token_requires_word_boundary() {
        let doc = Html::parse_document(r#"<body><p class="comment-text">kept</p></body>"#);
        let sel = Selector::parse("p").unwrap();
        let p = doc.select(&sel).next().unwrap();
        assert!(!is_non_content(p));
    }
}
