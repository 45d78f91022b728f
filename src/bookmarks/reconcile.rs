//! Partitioning of a catalog into bookmarked weeks, lessons and habits.

use crate::content::{ContentKind, ContentNode};

use super::types::BookmarkSet;

/// Bookmarked nodes per content type, in catalog order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciled<'a> {
    pub weeks: Vec<&'a ContentNode>,
    pub lessons: Vec<&'a ContentNode>,
    pub habits: Vec<&'a ContentNode>,
}

impl<'a> Reconciled<'a> {
    /// Result subsequence for one content type
    pub fn of_kind(&self, kind: ContentKind) -> &[&'a ContentNode] {
        match kind {
            ContentKind::Week => &self.weeks,
            ContentKind::Lesson => &self.lessons,
            ContentKind::Habit => &self.habits,
        }
    }

    pub fn len(&self) -> usize {
        self.weeks.len() + self.lessons.len() + self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Keep the catalog nodes the user has bookmarked, split by content type.
///
/// A node matches only a bookmark of its own type. Bookmarks with no
/// matching node are ignored.
pub fn reconcile_bookmarks<'a, I>(catalog: I, bookmarks: &BookmarkSet) -> Reconciled<'a>
where
    I: IntoIterator<Item = &'a ContentNode>,
{
    let mut result = Reconciled::default();
    if bookmarks.is_empty() {
        return result;
    }

    for node in catalog {
        if !bookmarks.is_bookmarked(node) {
            continue;
        }
        match node.kind {
            ContentKind::Week => result.weeks.push(node),
            ContentKind::Lesson => result.lessons.push(node),
            ContentKind::Habit => result.habits.push(node),
        }
    }

    result
}
