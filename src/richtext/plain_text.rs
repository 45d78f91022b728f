//! Plain-text rendering of rich-text documents.
//!
//! Text runs are concatenated as-is (marks are dropped). A divisor is
//! inserted after any node whose next sibling is a block, so paragraphs
//! and list items don't run together. Nodes that render to nothing are
//! skipped along with their divisor.

use super::document::{Node, NodeCategory};

/// Separator placed between block-level siblings
pub const BLOCK_DIVISOR: &str = " ";

/// Render a node and its descendants to plain text
pub fn to_plain_text(node: &Node) -> String {
    to_plain_text_with(node, BLOCK_DIVISOR)
}

/// Render with a custom block divisor (e.g. "\n" for line-oriented output)
pub fn to_plain_text_with(node: &Node, block_divisor: &str) -> String {
    let mut out = String::new();
    render_into(node, block_divisor, &mut out);
    out
}

fn render_into(node: &Node, block_divisor: &str, out: &mut String) {
    let children = &node.content;

    for (i, child) in children.iter().enumerate() {
        match child.node_type.category() {
            NodeCategory::Text => out.push_str(child.value.as_deref().unwrap_or_default()),
            NodeCategory::Block | NodeCategory::Inline => {
                let start = out.len();
                render_into(child, block_divisor, out);
                if out.len() == start {
                    continue;
                }
            }
        }

        let next_is_block = children
            .get(i + 1)
            .is_some_and(|next| next.node_type.is_block());
        if next_is_block {
            out.push_str(block_divisor);
        }
    }
}
