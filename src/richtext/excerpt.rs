//! Fixed-length plain-text previews of rich-text documents.

use super::document::Document;
use super::plain_text::to_plain_text;
use super::ParseError;

/// Default preview length in characters
pub const DEFAULT_EXCERPT_LENGTH: usize = 140;

/// Render `document` to plain text and keep the first `max_length` characters.
///
/// The cut is a hard one: no word-boundary trimming and no ellipsis.
pub fn extract_excerpt(document: &Document, max_length: usize) -> String {
    truncate_chars(&to_plain_text(document.root()), max_length)
}

/// Parse a JSON document and extract its excerpt
pub fn extract_excerpt_from_json(raw: &str, max_length: usize) -> Result<String, ParseError> {
    let document = Document::from_json(raw)?;
    Ok(extract_excerpt(&document, max_length))
}

/// Keep at most `max_chars` characters, never splitting a code point
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
