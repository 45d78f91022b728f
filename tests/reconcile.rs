//! Bookmark Reconciliation Integration Tests
//!
//! Tests for partitioning a catalog into bookmarked weeks, lessons and habits.

use nyxo::bookmarks::{reconcile_bookmarks, Bookmark, BookmarkSet};
use nyxo::content::{Catalog, ContentKind, ContentNode, Locale};

fn node(kind: ContentKind, slug: &str) -> ContentNode {
    ContentNode::new(format!("{}-{}", kind, slug), slug, kind, Locale::EnUs, slug)
}

fn set(bookmarks: &[(ContentKind, &str)]) -> BookmarkSet {
    bookmarks
        .iter()
        .map(|(kind, slug)| Bookmark::new(*kind, *slug))
        .collect()
}

fn slugs(nodes: &[&ContentNode]) -> Vec<String> {
    nodes.iter().map(|n| n.slug.clone()).collect()
}

fn mixed_catalog() -> Vec<ContentNode> {
    vec![
        node(ContentKind::Week, "light"),
        node(ContentKind::Lesson, "sunrise"),
        node(ContentKind::Habit, "morning-walk"),
        node(ContentKind::Week, "caffeine"),
        node(ContentKind::Lesson, "coffee-cutoff"),
        node(ContentKind::Lesson, "adenosine"),
        node(ContentKind::Habit, "no-screens"),
    ]
}

#[test]
fn test_scenario_from_page() {
    let catalog = vec![node(ContentKind::Week, "intro"), node(ContentKind::Lesson, "sleep-101")];
    let bookmarks = set(&[(ContentKind::Lesson, "sleep-101")]);

    let result = reconcile_bookmarks(&catalog, &bookmarks);
    assert!(result.weeks.is_empty());
    assert_eq!(slugs(&result.lessons), vec!["sleep-101"]);
    assert!(result.habits.is_empty());
}

#[test]
fn test_order_follows_catalog_not_bookmarks() {
    let catalog = mixed_catalog();
    let bookmarks = set(&[
        (ContentKind::Lesson, "adenosine"),
        (ContentKind::Lesson, "sunrise"),
        (ContentKind::Week, "caffeine"),
        (ContentKind::Week, "light"),
    ]);

    let result = reconcile_bookmarks(&catalog, &bookmarks);
    assert_eq!(slugs(&result.weeks), vec!["light", "caffeine"]);
    assert_eq!(slugs(&result.lessons), vec!["sunrise", "adenosine"]);
}

#[test]
fn test_soundness_and_completeness() {
    let catalog = mixed_catalog();
    let bookmarks = set(&[
        (ContentKind::Week, "caffeine"),
        (ContentKind::Habit, "no-screens"),
        (ContentKind::Lesson, "coffee-cutoff"),
    ]);

    let result = reconcile_bookmarks(&catalog, &bookmarks);

    for kind in ContentKind::ALL {
        let found = result.of_kind(kind);
        // Soundness: every result is bookmarked and of the right kind
        assert!(found.iter().all(|n| n.kind == kind && bookmarks.contains(kind, &n.slug)));
        // Completeness: every bookmarked catalog node of this kind is present
        let expected = catalog
            .iter()
            .filter(|n| n.kind == kind && bookmarks.contains(kind, &n.slug))
            .count();
        assert_eq!(found.len(), expected);
    }
    assert_eq!(result.len(), 3);
}

#[test]
fn test_slug_collision_across_types() {
    let catalog = vec![node(ContentKind::Week, "intro"), node(ContentKind::Lesson, "intro")];
    let bookmarks = set(&[(ContentKind::Lesson, "intro")]);

    let result = reconcile_bookmarks(&catalog, &bookmarks);
    assert!(result.weeks.is_empty());
    assert_eq!(result.lessons.len(), 1);
    assert_eq!(result.lessons[0].kind, ContentKind::Lesson);
}

#[test]
fn test_empty_inputs_yield_empty_results() {
    let catalog = mixed_catalog();
    assert!(reconcile_bookmarks(&catalog, &BookmarkSet::new()).is_empty());

    let bookmarks = set(&[(ContentKind::Week, "light")]);
    let empty: Vec<ContentNode> = Vec::new();
    let result = reconcile_bookmarks(&empty, &bookmarks);
    assert!(result.weeks.is_empty() && result.lessons.is_empty() && result.habits.is_empty());
}

#[test]
fn test_stale_bookmarks_are_dropped() {
    let catalog = mixed_catalog();
    let bookmarks = set(&[(ContentKind::Lesson, "deleted-lesson"), (ContentKind::Habit, "morning-walk")]);

    let result = reconcile_bookmarks(&catalog, &bookmarks);
    assert!(result.lessons.is_empty());
    assert_eq!(slugs(&result.habits), vec!["morning-walk"]);
}

#[test]
fn test_reconcile_against_locale_filtered_catalog() {
    let mut catalog = Catalog::new();
    catalog.add(ContentNode::new("w1", "light", ContentKind::Week, Locale::EnUs, "Light"));
    catalog.add(ContentNode::new("w1", "light", ContentKind::Week, Locale::FiFi, "Valo"));

    let bookmarks = set(&[(ContentKind::Week, "light")]);
    let result = reconcile_bookmarks(catalog.for_locale(Locale::FiFi), &bookmarks);

    assert_eq!(result.weeks.len(), 1);
    assert_eq!(result.weeks[0].title, "Valo");
}

#[test]
fn test_bookmarked_flag_is_derived_not_stored() {
    let catalog = mixed_catalog();
    let before = catalog.clone();
    let bookmarks = set(&[(ContentKind::Week, "light")]);

    let _ = reconcile_bookmarks(&catalog, &bookmarks);

    assert_eq!(catalog, before);
    assert!(bookmarks.is_bookmarked(&catalog[0]));
    assert!(!bookmarks.is_bookmarked(&catalog[3]));
}
