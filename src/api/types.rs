//! Payloads exchanged with the user-content service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bookmarks::Bookmark;
use crate::content::ContentKind;

/// A published comment on a piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub slug: String,
    #[serde(rename = "type")]
    pub content_type: ContentKind,
    pub first_name: String,
    pub last_name: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// A comment to be created
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub slug: String,
    #[serde(rename = "type")]
    pub content_type: ContentKind,
    pub first_name: String,
    pub last_name: String,
    pub comment: String,
}

/// Liked-content item as stored remotely.
///
/// The type is kept as a raw string so entries of unknown type don't fail
/// the whole listing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LikedContentItem {
    pub slug: String,
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
}

impl LikedContentItem {
    pub(crate) fn into_bookmark(self) -> Option<Bookmark> {
        let kind = self.content_type?.parse::<ContentKind>().ok()?;
        Some(Bookmark::new(kind, self.slug))
    }
}

/// GraphQL list connection
#[derive(Debug, Deserialize)]
pub(crate) struct Items<T> {
    pub items: Vec<T>,
}
