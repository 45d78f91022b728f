//! Build-time node processing.
//!
//! Every node carrying CMS rich text gets its derived fields attached:
//! the plain-text `excerpt` and a `reading_time` estimate. Fields are
//! keyed by a digest of the source document so reprocessing an unchanged
//! node is a no-op.
//!
//! A node whose rich text fails to parse is reported and left without
//! derived fields; the rest of the catalog is still processed.

pub mod reading_time;

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::content::{Catalog, ContentId, ContentNode, NodeFields};
use crate::richtext::{to_plain_text, truncate_chars, Document, ParseError, DEFAULT_EXCERPT_LENGTH};

pub use reading_time::DEFAULT_WORDS_PER_MINUTE;

/// What happened to a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeOutcome {
    /// Derived fields were (re)computed
    Processed,

    /// Fields already match the current document
    Unchanged,

    /// No CMS rich text on this node
    Skipped,
}

/// A node whose rich text could not be parsed
#[derive(Debug, Clone, Serialize)]
pub struct BuildFailure {
    pub id: ContentId,
    pub slug: String,
    pub error: String,
}

/// Summary of a catalog build
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub processed: usize,
    pub unchanged: usize,
    pub skipped: usize,
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Attaches derived fields to content nodes
#[derive(Debug, Clone)]
pub struct NodeProcessor {
    excerpt_length: usize,
    words_per_minute: u32,
}

impl Default for NodeProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_EXCERPT_LENGTH)
    }
}

impl NodeProcessor {
    pub fn new(excerpt_length: usize) -> Self {
        Self {
            excerpt_length,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
        }
    }

    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    pub fn excerpt_length(&self) -> usize {
        self.excerpt_length
    }

    /// Compute and attach derived fields for one node.
    ///
    /// On a parse error, or when the node no longer carries CMS rich text,
    /// the node's derived fields are cleared.
    pub fn process(&self, node: &mut ContentNode) -> Result<NodeOutcome, ParseError> {
        let Some(source) = node.rich_text.as_ref().filter(|s| s.is_cms_rich_text()) else {
            if node.fields != NodeFields::default() {
                debug!(id = %node.id, slug = %node.slug, "Clearing derived fields of node without rich text");
                node.fields = NodeFields::default();
            }
            return Ok(NodeOutcome::Skipped);
        };

        let digest = self.digest(&source.document);
        if node.fields.content_digest.as_deref() == Some(digest.as_str()) {
            return Ok(NodeOutcome::Unchanged);
        }

        let document = match Document::from_value(&source.document) {
            Ok(document) => document,
            Err(e) => {
                node.fields = NodeFields::default();
                return Err(e);
            }
        };

        let text = to_plain_text(document.root());
        node.fields = NodeFields {
            excerpt: Some(truncate_chars(&text, self.excerpt_length)),
            reading_time: reading_time::estimate(&text, self.words_per_minute),
            content_digest: Some(digest),
        };

        Ok(NodeOutcome::Processed)
    }

    /// Process every node of the catalog, continuing past failures
    pub fn process_catalog(&self, catalog: &mut Catalog) -> BuildReport {
        let mut report = BuildReport::default();

        for node in catalog.nodes.iter_mut() {
            match self.process(node) {
                Ok(NodeOutcome::Processed) => {
                    debug!(id = %node.id, slug = %node.slug, "Attached derived fields");
                    report.processed += 1;
                }
                Ok(NodeOutcome::Unchanged) => report.unchanged += 1,
                Ok(NodeOutcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    warn!(id = %node.id, slug = %node.slug, error = %e, "Failed to process rich text");
                    report.failures.push(BuildFailure {
                        id: node.id.clone(),
                        slug: node.slug.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        info!(
            processed = report.processed,
            unchanged = report.unchanged,
            skipped = report.skipped,
            failed = report.failures.len(),
            "Catalog build finished"
        );

        report
    }

    /// Digest of the document and the settings the fields depend on
    fn digest(&self, document: &serde_json::Value) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{}:{}:", self.excerpt_length, self.words_per_minute).as_bytes());
        hasher.update(document.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentKind, Locale, RichTextSource};
    use serde_json::json;

    fn doc(text: &str) -> serde_json::Value {
        json!({
            "nodeType": "document",
            "data": {},
            "content": [{
                "nodeType": "paragraph",
                "data": {},
                "content": [{ "nodeType": "text", "value": text, "marks": [], "data": {} }]
            }]
        })
    }

    fn lesson(slug: &str, text: &str) -> ContentNode {
        ContentNode::new(slug, slug, ContentKind::Lesson, Locale::EnUs, slug).with_rich_text(doc(text))
    }

    #[test]
    fn test_process_attaches_excerpt() {
        let mut node = lesson("light", &"a".repeat(300));
        let outcome = NodeProcessor::default().process(&mut node).unwrap();

        assert_eq!(outcome, NodeOutcome::Processed);
        assert_eq!(node.excerpt().unwrap().len(), 140);
        assert_eq!(node.fields.reading_time.unwrap().minutes, 1);
        assert!(node.fields.content_digest.is_some());
    }

    #[test]
    fn test_reprocessing_is_idempotent() {
        let processor = NodeProcessor::new(20);
        let mut node = lesson("light", "Bright light in the morning anchors your clock.");

        processor.process(&mut node).unwrap();
        let first = node.fields.clone();

        assert_eq!(processor.process(&mut node).unwrap(), NodeOutcome::Unchanged);
        assert_eq!(node.fields, first);
        assert_eq!(node.excerpt(), Some("Bright light in the "));
    }

    #[test]
    fn test_changed_settings_reprocess() {
        let mut node = lesson("light", "Bright light in the morning.");
        NodeProcessor::new(5).process(&mut node).unwrap();

        assert_eq!(NodeProcessor::new(6).process(&mut node).unwrap(), NodeOutcome::Processed);
        assert_eq!(node.excerpt(), Some("Bright"));
    }

    #[test]
    fn test_non_cms_rich_text_is_skipped() {
        let mut node = lesson("light", "text");
        node.rich_text = Some(RichTextSource {
            owner: "gatsby-source-filesystem".to_string(),
            ..RichTextSource::from_cms(doc("text"))
        });

        assert_eq!(NodeProcessor::default().process(&mut node).unwrap(), NodeOutcome::Skipped);
        assert!(node.excerpt().is_none());
    }

    #[test]
    fn test_cms_owned_rich_text_is_processed() {
        let mut node = ContentNode::new("l1", "light", ContentKind::Lesson, Locale::EnUs, "Light");
        node.rich_text = Some(RichTextSource {
            media_type: "text/richtext".to_string(),
            owner: "gatsby-source-contentful".to_string(),
            document: doc("Sleep tight"),
        });

        assert_eq!(NodeProcessor::default().process(&mut node).unwrap(), NodeOutcome::Processed);
        assert_eq!(node.excerpt(), Some("Sleep tight"));
    }

    #[test]
    fn test_removed_rich_text_clears_fields() {
        let processor = NodeProcessor::default();
        let mut node = lesson("light", "Sleep tight");
        processor.process(&mut node).unwrap();
        assert_eq!(node.excerpt(), Some("Sleep tight"));

        node.rich_text = None;
        assert_eq!(processor.process(&mut node).unwrap(), NodeOutcome::Skipped);
        assert_eq!(node.fields, NodeFields::default());
    }

    #[test]
    fn test_non_cms_rich_text_clears_stale_fields() {
        let processor = NodeProcessor::default();
        let mut node = lesson("light", "Sleep tight");
        processor.process(&mut node).unwrap();

        if let Some(source) = node.rich_text.as_mut() {
            source.owner = "gatsby-source-filesystem".to_string();
        }
        assert_eq!(processor.process(&mut node).unwrap(), NodeOutcome::Skipped);
        assert!(node.excerpt().is_none());
        assert!(node.fields.content_digest.is_none());
    }

    #[test]
    fn test_parse_error_clears_fields() {
        let mut node = lesson("light", "text");
        NodeProcessor::default().process(&mut node).unwrap();

        node.rich_text = Some(RichTextSource::from_cms(json!({"nodeType": "paragraph"})));
        assert!(NodeProcessor::default().process(&mut node).is_err());
        assert_eq!(node.fields, NodeFields::default());
    }

    #[test]
    fn test_catalog_continues_past_failures() {
        let mut catalog = Catalog::new();
        catalog.add(lesson("first", "One"));
        catalog.add(
            ContentNode::new("bad", "bad", ContentKind::Habit, Locale::EnUs, "bad")
                .with_rich_text(json!({"nodeType": "document", "content": [{"nodeType": "bogus"}]})),
        );
        catalog.add(ContentNode::new("plain", "plain", ContentKind::Week, Locale::EnUs, "plain"));
        catalog.add(lesson("last", "Two"));

        let report = NodeProcessor::default().process_catalog(&mut catalog);

        assert_eq!(report.processed, 2);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].slug, "bad");
        assert!(!report.is_success());
        assert_eq!(catalog.nodes[3].excerpt(), Some("Two"));
    }
}
