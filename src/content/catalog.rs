//! Catalog of content nodes exported from the CMS.
//!
//! Simple JSON export that can be filtered by kind and locale.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use super::locale::Locale;
use super::node::{ContentId, ContentKind, ContentNode};

/// Slug of the onboarding week, listed apart from the coaching weeks
pub const INTRODUCTION_SLUG: &str = "introduction";

/// Catalog of all content nodes, across locales
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Export format version
    pub version: u32,

    /// All nodes, in export order
    pub nodes: Vec<ContentNode>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self {
            version: 1,
            nodes: Vec::new(),
        }
    }

    /// Load a catalog export from disk (missing file means empty catalog)
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog JSON: {}", path.display()))
    }

    /// Save the catalog to disk
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write catalog: {}", path.display()))?;

        Ok(())
    }

    /// Add a node, replacing any node with the same id and locale
    pub fn add(&mut self, node: ContentNode) {
        if let Some(existing) = self
            .nodes
            .iter_mut()
            .find(|n| n.id == node.id && n.locale == node.locale)
        {
            *existing = node;
        } else {
            self.nodes.push(node);
        }
    }

    /// Get a node by id and locale
    pub fn get(&self, id: &ContentId, locale: Locale) -> Option<&ContentNode> {
        self.nodes.iter().find(|n| &n.id == id && n.locale == locale)
    }

    /// Find a node by its slug
    pub fn find_by_slug(&self, kind: ContentKind, slug: &str, locale: Locale) -> Option<&ContentNode> {
        self.nodes
            .iter()
            .find(|n| n.kind == kind && n.locale == locale && n.slug == slug)
    }

    /// All nodes of a locale, in export order
    pub fn for_locale(&self, locale: Locale) -> Vec<&ContentNode> {
        self.nodes.iter().filter(|n| n.locale == locale).collect()
    }

    /// Nodes of one kind in a locale, in export order
    pub fn filter_by_kind(&self, kind: ContentKind, locale: Locale) -> Vec<&ContentNode> {
        self.nodes
            .iter()
            .filter(|n| n.kind == kind && n.locale == locale)
            .collect()
    }

    /// Weeks shown on the coaching page: introduction excluded, sorted by order
    pub fn coaching_weeks(&self, locale: Locale) -> Vec<&ContentNode> {
        let mut weeks: Vec<_> = self
            .filter_by_kind(ContentKind::Week, locale)
            .into_iter()
            .filter(|w| w.slug != INTRODUCTION_SLUG)
            .collect();
        // Stable sort keeps export order for unordered weeks, which go last
        weeks.sort_by_key(|w| w.order.unwrap_or(u32::MAX));
        weeks
    }

    /// Lessons of a week, in export order
    pub fn lessons_for_week(&self, week_slug: &str, locale: Locale) -> Vec<&ContentNode> {
        self.filter_by_kind(ContentKind::Lesson, locale)
            .into_iter()
            .filter(|l| l.week.as_deref() == Some(week_slug))
            .collect()
    }

    /// Search titles and excerpts (case-insensitive substring match)
    pub fn search(&self, query: &str, locale: Locale) -> Vec<&ContentNode> {
        let query_lower = query.to_lowercase();

        self.nodes
            .iter()
            .filter(|n| n.locale == locale)
            .filter(|n| {
                n.title.to_lowercase().contains(&query_lower)
                    || n.slug.contains(&query_lower)
                    || n
                        .excerpt()
                        .is_some_and(|e| e.to_lowercase().contains(&query_lower))
            })
            .collect()
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
