//! Bookmark types.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::content::{ContentKind, ContentNode};

/// A user's marker on a piece of content, qualified by content type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bookmark {
    pub slug: String,

    #[serde(rename = "type")]
    pub content_type: ContentKind,
}

impl Bookmark {
    pub fn new(content_type: ContentKind, slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            content_type,
        }
    }
}

/// A user's bookmarks, indexed by content type
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkSet {
    by_type: HashMap<ContentKind, HashSet<String>>,
}

impl BookmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a bookmark; returns false if it was already present
    pub fn insert(&mut self, bookmark: Bookmark) -> bool {
        self.by_type
            .entry(bookmark.content_type)
            .or_default()
            .insert(bookmark.slug)
    }

    /// Whether `slug` is bookmarked as content of type `kind`
    pub fn contains(&self, kind: ContentKind, slug: &str) -> bool {
        self.by_type.get(&kind).is_some_and(|slugs| slugs.contains(slug))
    }

    /// Render-time "bookmarked" flag for a node
    pub fn is_bookmarked(&self, node: &ContentNode) -> bool {
        self.contains(node.kind, &node.slug)
    }

    pub fn len(&self) -> usize {
        self.by_type.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All bookmarks, sorted by type then slug
    pub fn to_vec(&self) -> Vec<Bookmark> {
        let mut all: Vec<_> = self
            .by_type
            .iter()
            .flat_map(|(kind, slugs)| slugs.iter().map(|s| Bookmark::new(*kind, s.clone())))
            .collect();
        all.sort_by(|a, b| {
            (a.content_type as u8, &a.slug).cmp(&(b.content_type as u8, &b.slug))
        });
        all
    }
}

impl FromIterator<Bookmark> for BookmarkSet {
    fn from_iter<I: IntoIterator<Item = Bookmark>>(iter: I) -> Self {
        let mut set = Self::new();
        for bookmark in iter {
            set.insert(bookmark);
        }
        set
    }
}
