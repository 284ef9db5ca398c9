//! Content item models.
//!
//! Each extracted element becomes one `ContentItem` in the output document,
//! tagged by a `"type"` field in the serialized JSON.

use serde::{Deserialize, Serialize};

/// Ordering of a list element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListType {
    Ordered,
    Unordered,
}

/// Marker for nested list items; serializes as `"type": "sublist"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SublistTag {
    Sublist,
}

/// A single list item, possibly carrying a nested list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    pub text: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub item_type: Option<SublistTag>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub list_type: Option<ListType>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub items: Option<Vec<ListItem>>,
}

impl ListItem {
    /// A plain item with no nested list.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            item_type: None,
            list_type: None,
            items: None,
        }
    }

    /// An item carrying a nested list.
    pub fn with_sublist(text: impl Into<String>, list_type: ListType, items: Vec<ListItem>) -> Self {
        Self {
            text: text.into(),
            item_type: Some(SublistTag::Sublist),
            list_type: Some(list_type),
            items: Some(items),
        }
    }
}

/// A piece of extracted document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph {
        text: String,
    },
    List {
        list_type: ListType,
        items: Vec<ListItem>,
    },
    Blockquote {
        text: String,
    },
    /// A code block; `text` preserves the original line breaks.
    CodeBlock {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        language: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        caption: Option<String>,
        text: String,
    },
    Image {
        src: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        alt: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        caption: Option<String>,
    },
    Table {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        caption: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        headers: Option<Vec<String>>,
        rows: Vec<Vec<String>>,
    },
    /// Heading-scoped grouping produced by the section organizer.
    Section {
        level: u8,
        content: Vec<ContentItem>,
    },
}

impl ContentItem {
    /// Short type tag, matching the serialized `"type"` field.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Heading { .. } => "heading",
            Self::Paragraph { .. } => "paragraph",
            Self::List { .. } => "list",
            Self::Blockquote { .. } => "blockquote",
            Self::CodeBlock { .. } => "code_block",
            Self::Image { .. } => "image",
            Self::Table { .. } => "table",
            Self::Section { .. } => "section",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_serializes_with_type_tag() {
        let item = ContentItem::Heading {
            level: 2,
            text: "Overview".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "heading");
        assert_eq!(json["level"], 2);
        assert_eq!(json["text"], "Overview");
    }

    #[test]
    fn test_list_item_omits_empty_sublist_fields() {
        let item = ListItem::new("plain");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, serde_json::json!({"text": "plain"}));
    }

    #[test]
    fn test_sublist_item_shape() {
        let item = ListItem::with_sublist(
            "outer",
            ListType::Ordered,
            vec![ListItem::new("inner")],
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "sublist");
        assert_eq!(json["list_type"], "ordered");
        assert_eq!(json["items"][0]["text"], "inner");
    }

    #[test]
    fn test_code_block_omits_missing_language() {
        let item = ContentItem::CodeBlock {
            language: None,
            caption: None,
            text: "let x = 1;".to_string(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "code_block");
        assert!(json.get("language").is_none());
        assert!(json.get("caption").is_none());
    }

    #[test]
    fn test_roundtrip_through_json() {
        let item = ContentItem::Table {
            caption: Some("Data".to_string()),
            headers: Some(vec!["a".to_string(), "b".to_string()]),
            rows: vec![vec!["1".to_string(), "2".to_string()]],
        };
        let json = serde_json::to_string(&item).unwrap();
        let back: ContentItem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
