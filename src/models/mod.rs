//! Data models for web2json documents.

mod content;
mod document;

pub use content::{ContentItem, ListItem, ListType, SublistTag};
pub use document::{Document, Metadata, DEFAULT_TITLE};
