//! Rich-text documents produced by the CMS.
//!
//! - `document`: typed node tree with `nodeType` discriminants
//! - `plain_text`: formatting-stripping renderer
//! - `excerpt`: fixed-length previews attached to content nodes at build time

pub mod document;
pub mod excerpt;
pub mod plain_text;

use thiserror::Error;

pub use document::{Document, Mark, Node, NodeCategory, NodeType};
pub use excerpt::{extract_excerpt, extract_excerpt_from_json, truncate_chars, DEFAULT_EXCERPT_LENGTH};
pub use plain_text::{to_plain_text, to_plain_text_with, BLOCK_DIVISOR};

/// A rich-text payload that cannot be rendered
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid rich-text JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a document root, found {0:?}")]
    NotADocument(NodeType),

    #[error("document node nested inside a document")]
    NestedDocument,

    #[error("text node without a value")]
    MissingTextValue,
}
