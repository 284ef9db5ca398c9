//! web2json - Web page to structured JSON converter.
//!
//! Fetches web pages, parses their HTML, extracts the structural content
//! (headings, paragraphs, lists, blockquotes, tables, code blocks, images)
//! and writes the result as a structured JSON document.

pub mod cli;
pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod parse;
pub mod pipeline;
pub mod utils;

pub use error::Web2JsonError;
pub use models::{ContentItem, Document, Metadata};
