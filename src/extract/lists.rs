//! List extraction with nested sublist handling.

use scraper::{ElementRef, Node};

use super::text::{is_style_tag, normalize_whitespace, render_inline};
use crate::models::{ContentItem, ListItem, ListType};

/// Extract a `<ul>` or `<ol>` element into a list content item.
pub fn extract_list(list: ElementRef, preserve_styles: bool) -> ContentItem {
    ContentItem::List {
        list_type: list_type_of(list),
        items: extract_list_items(list, preserve_styles),
    }
}

fn list_type_of(list: ElementRef) -> ListType {
    if list.value().name() == "ol" {
        ListType::Ordered
    } else {
        ListType::Unordered
    }
}

/// Extract the direct `<li>` children of a list, recursing into nested lists.
pub fn extract_list_items(list: ElementRef, preserve_styles: bool) -> Vec<ListItem> {
    let mut items = Vec::new();

    for child in list.children() {
        let Some(li) = ElementRef::wrap(child) else {
            continue;
        };
        if li.value().name() != "li" {
            continue;
        }

        let text = item_text(li, preserve_styles);

        // Only the first nested list counts; further ones are rare and noisy.
        let nested = li.children().filter_map(ElementRef::wrap).find(|el| {
            let name = el.value().name();
            name == "ul" || name == "ol"
        });

        let item = match nested {
            Some(sublist) => {
                let nested_items = extract_list_items(sublist, preserve_styles);
                if nested_items.is_empty() {
                    ListItem::new(text)
                } else {
                    ListItem::with_sublist(text, list_type_of(sublist), nested_items)
                }
            }
            None => ListItem::new(text),
        };

        items.push(item);
    }

    items
}

/// Text of a list item, excluding any nested lists. Nodes are appended to
/// one buffer so no separators appear that the source HTML lacks.
fn item_text(li: ElementRef, preserve_styles: bool) -> String {
    let mut out = String::new();

    for child in li.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.value().name();
                if name == "ul" || name == "ol" {
                    continue;
                }
                if preserve_styles && is_style_tag(name) {
                    out.push_str(&render_inline(el, preserve_styles));
                } else {
                    for text in el.text() {
                        out.push_str(text);
                    }
                }
            }
            _ => {}
        }
    }

    normalize_whitespace(&out)
}
