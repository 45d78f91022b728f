//! Rich-text document model.
//!
//! Mirrors the CMS document schema: every node carries a `nodeType`
//! discriminant, text nodes carry a `value`, everything else carries
//! child `content`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ParseError;

/// Discriminant of a rich-text node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeType {
    Document,
    Paragraph,
    #[serde(rename = "heading-1")]
    Heading1,
    #[serde(rename = "heading-2")]
    Heading2,
    #[serde(rename = "heading-3")]
    Heading3,
    #[serde(rename = "heading-4")]
    Heading4,
    #[serde(rename = "heading-5")]
    Heading5,
    #[serde(rename = "heading-6")]
    Heading6,
    OrderedList,
    UnorderedList,
    ListItem,
    Hr,
    Blockquote,
    EmbeddedEntryBlock,
    EmbeddedAssetBlock,
    Table,
    TableRow,
    TableCell,
    TableHeaderCell,
    EmbeddedResourceBlock,

    Hyperlink,
    EntryHyperlink,
    AssetHyperlink,
    ResourceHyperlink,
    EmbeddedEntryInline,
    EmbeddedResourceInline,

    Text,
}

/// Coarse classification used by the plain-text renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Block,
    Inline,
    Text,
}

impl NodeType {
    pub fn category(self) -> NodeCategory {
        match self {
            NodeType::Hyperlink
            | NodeType::EntryHyperlink
            | NodeType::AssetHyperlink
            | NodeType::ResourceHyperlink
            | NodeType::EmbeddedEntryInline
            | NodeType::EmbeddedResourceInline => NodeCategory::Inline,
            NodeType::Text => NodeCategory::Text,
            _ => NodeCategory::Block,
        }
    }

    pub fn is_block(self) -> bool {
        self.category() == NodeCategory::Block
    }
}

/// Formatting mark on a text run (bold, italic, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: String,
}

/// A single node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub node_type: NodeType,

    /// Text runs only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub marks: Vec<Mark>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<Node>,

    /// Link targets, embedded entry references
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Node {
    /// Create a text run
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            node_type: NodeType::Text,
            value: Some(value.into()),
            marks: Vec::new(),
            content: Vec::new(),
            data: Value::Null,
        }
    }

    /// Create a block or inline node with children
    pub fn element(node_type: NodeType, content: Vec<Node>) -> Self {
        Self {
            node_type,
            value: None,
            marks: Vec::new(),
            content,
            data: Value::Null,
        }
    }

    fn validate(&self) -> Result<(), ParseError> {
        match self.node_type {
            NodeType::Text if self.value.is_none() => Err(ParseError::MissingTextValue),
            NodeType::Text => Ok(()),
            NodeType::Document => Err(ParseError::NestedDocument),
            _ => self.content.iter().try_for_each(Node::validate),
        }
    }
}

/// A validated rich-text document (root node of type `document`)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Node);

impl Document {
    /// Build a document from top-level blocks
    pub fn new(content: Vec<Node>) -> Self {
        Self(Node::element(NodeType::Document, content))
    }

    /// An empty document
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Parse a document from its JSON text
    pub fn from_json(raw: &str) -> Result<Self, ParseError> {
        let root: Node = serde_json::from_str(raw)?;
        Self::from_root(root)
    }

    /// Parse a document from an already decoded JSON value
    pub fn from_value(value: &Value) -> Result<Self, ParseError> {
        let root = Node::deserialize(value)?;
        Self::from_root(root)
    }

    fn from_root(root: Node) -> Result<Self, ParseError> {
        if root.node_type != NodeType::Document {
            return Err(ParseError::NotADocument(root.node_type));
        }
        root.content.iter().try_for_each(Node::validate)?;
        Ok(Self(root))
    }

    pub fn root(&self) -> &Node {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.content.is_empty()
    }
}
