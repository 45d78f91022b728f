//! Catalog Build Integration Tests
//!
//! Tests for attaching derived fields to an exported catalog on disk.

use nyxo::build::NodeProcessor;
use nyxo::content::{Catalog, ContentKind, ContentNode, Locale};
use serde_json::json;
use tempfile::TempDir;

fn rich_text(paragraphs: &[&str]) -> serde_json::Value {
    let content: Vec<_> = paragraphs
        .iter()
        .map(|p| {
            json!({
                "nodeType": "paragraph",
                "data": {},
                "content": [{ "nodeType": "text", "value": p, "marks": [], "data": {} }]
            })
        })
        .collect();
    json!({ "nodeType": "document", "data": {}, "content": content })
}

#[tokio::test]
async fn test_build_persists_excerpts() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("catalog.json");

    let long_text = "Keeping a regular schedule is the single most effective change. ".repeat(5);
    let mut catalog = Catalog::new();
    catalog.add(
        ContentNode::new("l1", "schedule", ContentKind::Lesson, Locale::EnUs, "Schedule")
            .with_rich_text(rich_text(&[long_text.as_str(), "Second paragraph."])),
    );
    catalog.add(
        ContentNode::new("h1", "walk", ContentKind::Habit, Locale::EnUs, "Walk")
            .with_rich_text(rich_text(&["Walk outside after waking."])),
    );
    catalog.save(&path).await.unwrap();

    let mut loaded = Catalog::load(&path).await.unwrap();
    let report = NodeProcessor::default().process_catalog(&mut loaded);
    assert_eq!(report.processed, 2);
    loaded.save(&path).await.unwrap();

    let built = Catalog::load(&path).await.unwrap();
    let lesson = built.find_by_slug(ContentKind::Lesson, "schedule", Locale::EnUs).unwrap();
    let habit = built.find_by_slug(ContentKind::Habit, "walk", Locale::EnUs).unwrap();

    assert_eq!(lesson.excerpt().unwrap().chars().count(), 140);
    assert!(long_text.starts_with(lesson.excerpt().unwrap()));
    assert_eq!(habit.excerpt(), Some("Walk outside after waking."));
}

#[tokio::test]
async fn test_rebuild_is_idempotent() {
    let mut catalog = Catalog::new();
    catalog.add(
        ContentNode::new("w1", "light", ContentKind::Week, Locale::FiFi, "Valo")
            .with_rich_text(rich_text(&["Aamuvalo tahdistaa sisäisen kellon."])),
    );

    let processor = NodeProcessor::new(20);
    let first = processor.process_catalog(&mut catalog);
    let snapshot = catalog.nodes.clone();
    let second = processor.process_catalog(&mut catalog);

    assert_eq!(first.processed, 1);
    assert_eq!(second.processed, 0);
    assert_eq!(second.unchanged, 1);
    assert_eq!(catalog.nodes, snapshot);
    assert_eq!(catalog.nodes[0].excerpt(), Some("Aamuvalo tahdistaa s"));
}

#[tokio::test]
async fn test_bad_node_does_not_abort_build() {
    let mut catalog = Catalog::new();
    catalog.add(
        ContentNode::new("l1", "broken", ContentKind::Lesson, Locale::EnUs, "Broken")
            .with_rich_text(json!({ "nodeType": "document", "content": "not a list" })),
    );
    catalog.add(
        ContentNode::new("l2", "fine", ContentKind::Lesson, Locale::EnUs, "Fine")
            .with_rich_text(rich_text(&["All good."])),
    );

    let report = NodeProcessor::default().process_catalog(&mut catalog);

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].slug, "broken");
    assert!(catalog.nodes[0].excerpt().is_none());
    assert_eq!(catalog.nodes[1].excerpt(), Some("All good."));
}
