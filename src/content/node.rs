//! Content nodes exported from the CMS.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::locale::Locale;

/// CMS entry identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(String);

impl ContentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Type of coaching content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// A coaching week, grouping lessons
    Week,

    /// A single lesson
    Lesson,

    /// A habit suggested by lessons
    Habit,
}

impl ContentKind {
    pub const ALL: [ContentKind; 3] = [ContentKind::Week, ContentKind::Lesson, ContentKind::Habit];

    /// Site path prefix for detail pages
    pub fn path_prefix(self) -> &'static str {
        match self {
            ContentKind::Week => "/week",
            ContentKind::Lesson => "/lesson",
            ContentKind::Habit => "/habit",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Week => write!(f, "week"),
            ContentKind::Lesson => write!(f, "lesson"),
            ContentKind::Habit => write!(f, "habit"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "week" | "weeks" => Ok(ContentKind::Week),
            "lesson" | "lessons" => Ok(ContentKind::Lesson),
            "habit" | "habits" => Ok(ContentKind::Habit),
            _ => anyhow::bail!("Unknown content type: {}", s),
        }
    }
}

/// Section a lesson belongs to within its week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub order: Option<u32>,
}

/// Raw rich-text payload as loaded from the CMS, before parsing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichTextSource {
    /// Media type reported by the source plugin
    pub media_type: String,

    /// Source plugin that produced the payload
    pub owner: String,

    /// Undecoded document tree
    pub document: Value,
}

impl RichTextSource {
    /// Media type of rich-text payloads
    pub const MEDIA_TYPE: &'static str = "text/richtext";

    /// Owner of payloads coming from the CMS source
    pub const CMS_OWNER: &'static str = "gatsby-source-contentful";

    /// Wrap a document coming from the CMS source
    pub fn from_cms(document: Value) -> Self {
        Self {
            media_type: Self::MEDIA_TYPE.to_string(),
            owner: Self::CMS_OWNER.to_string(),
            document,
        }
    }

    /// Whether this payload should be run through the excerpt transform
    pub fn is_cms_rich_text(&self) -> bool {
        self.media_type == Self::MEDIA_TYPE && self.owner == Self::CMS_OWNER
    }
}

/// Estimated reading time of a node's rich text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingTime {
    pub minutes: u32,
    pub words: usize,
}

/// Fields derived during the build
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<ReadingTime>,

    /// SHA256 of the rich text the fields were derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_digest: Option<String>,
}

/// A week, lesson or habit in a given locale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub id: ContentId,

    pub slug: String,

    pub locale: Locale,

    pub kind: ContentKind,

    /// Week name, lesson name or habit title
    pub title: String,

    /// Sort position within its kind
    #[serde(default)]
    pub order: Option<u32>,

    #[serde(default)]
    pub section: Option<Section>,

    /// Slug of the week a lesson belongs to
    #[serde(default)]
    pub week: Option<String>,

    /// Description (weeks, habits) or lesson content
    #[serde(default)]
    pub rich_text: Option<RichTextSource>,

    #[serde(default)]
    pub fields: NodeFields,
}

impl ContentNode {
    /// Create a new node without rich text
    pub fn new(
        id: impl Into<String>,
        slug: impl Into<String>,
        kind: ContentKind,
        locale: Locale,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: ContentId::new(id),
            slug: slug.into(),
            locale,
            kind,
            title: title.into(),
            order: None,
            section: None,
            week: None,
            rich_text: None,
            fields: NodeFields::default(),
        }
    }

    /// Set the sort position
    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the lesson section
    pub fn with_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    /// Set the week a lesson belongs to
    pub fn with_week(mut self, week_slug: impl Into<String>) -> Self {
        self.week = Some(week_slug.into());
        self
    }

    /// Attach a rich-text document from the CMS
    pub fn with_rich_text(mut self, document: Value) -> Self {
        self.rich_text = Some(RichTextSource::from_cms(document));
        self
    }

    /// Site path of the node's detail page
    pub fn path(&self) -> String {
        format!("{}/{}", self.kind.path_prefix(), self.slug)
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.fields.excerpt.as_deref()
    }
}
