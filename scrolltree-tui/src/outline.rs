//! Builds a navigable outline of a JSON document.
//!
//! Every container becomes a node summarising its size, every scalar a leaf
//! showing its value. Nodes carry a [`OutlineAction::Reveal`] pointing back
//! into the document, resolved later by the [`Revealer`](crate::reveal::Revealer).

use serde_json::Value;

use scrolltree::{NodeBuilder, Tree};

/// What activating an outline node asks the host to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineAction {
    /// Show the value at this JSON pointer.
    Reveal { pointer: String },
}

/// Outline `document`, with `title` naming the root.
pub fn build_outline(title: &str, document: &Value) -> Tree<OutlineAction> {
    let root = outline_node(title, String::new(), document);
    log::debug!(
        "[outline] {:?} has {} top-level entries",
        title,
        root.child_count()
    );
    root.freeze_as_root()
}

/// Build `value`'s subtree leaf-first, then its own node.
fn outline_node(key: &str, pointer: String, value: &Value) -> NodeBuilder<OutlineAction> {
    let children: Vec<_> = match value {
        Value::Object(map) => map
            .iter()
            .map(|(name, child)| {
                let child_pointer = format!("{}/{}", pointer, escape_pointer(name));
                outline_node(name, child_pointer, child)
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, child)| outline_node(&format!("[{index}]"), format!("{pointer}/{index}"), child))
            .collect(),
        _ => Vec::new(),
    };

    let mut node = NodeBuilder::with_action(label(key, value), OutlineAction::Reveal { pointer });
    node.extend_children(children);
    node
}

fn label(key: &str, value: &Value) -> String {
    match value {
        Value::Object(map) => format!("{} {}", key, counted(map.len(), "field")),
        Value::Array(items) => format!("{} {}", key, counted(items.len(), "item")),
        Value::String(s) => format!("{key}: {s}"),
        other => format!("{key}: {other}"),
    }
}

/// "1 field", "3 fields".
pub fn counted(count: usize, word: &str) -> String {
    if count > 1 {
        format!("{count} {word}s")
    } else {
        format!("{count} {word}")
    }
}

/// Escape one JSON pointer segment.
fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}
