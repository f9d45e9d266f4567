//! Error types.

use std::any::Any;
use std::io;

use thiserror::Error;

use crate::tree::NodeId;

/// Errors surfaced to the host.
#[derive(Debug, Error)]
pub enum Error {
    /// A viewport must show at least the focus row.
    #[error("viewport needs at least one line")]
    EmptyViewport,

    /// The centre row is deeper than the indentation base, so rows above it
    /// could end up with negative indentation.
    #[error("viewport of {line_count} lines exceeds the maximum of {max} lines")]
    ViewportTooTall {
        /// Requested number of lines.
        line_count: usize,
        /// Largest accepted number of lines.
        max: usize,
    },

    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}

/// A violated invariant of a frozen tree, reported by
/// [`Tree::validate`](crate::Tree::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("root has depth {0}, expected 0")]
    RootDepth(usize),
    #[error("root has a parent or siblings")]
    RootLinked,
    #[error("node {0} has no parent but is not the root")]
    Orphan(NodeId),
    #[error("node {node} is missing from the children of its parent {parent}")]
    Detached { node: NodeId, parent: NodeId },
    #[error("node {node} appears {count} times among its parent's children")]
    DuplicateChild { node: NodeId, count: usize },
    #[error("node {node} has depth {depth}, expected {expected}")]
    Depth {
        node: NodeId,
        depth: usize,
        expected: usize,
    },
    #[error("sibling links of node {0} disagree with its parent's child order")]
    SiblingLinks(NodeId),
}

/// Failure returned by an [`ActionHandler`](crate::ActionHandler).
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// An action that failed while the cursor activated a node.
///
/// The cursor never hands this back to the caller of `enter`; it is logged
/// and passed to the reporter installed with
/// [`Cursor::on_error`](crate::Cursor::on_error).
#[derive(Debug, Error)]
#[error("action of node {node} ({value:?}) failed: {kind}")]
pub struct ActionFailure {
    /// The focused node whose action failed.
    pub node: NodeId,
    /// Its display label.
    pub value: String,
    pub kind: FailureKind,
}

/// How an action failed.
#[derive(Debug, Error)]
pub enum FailureKind {
    /// The handler returned an error.
    #[error("{0}")]
    Error(ActionError),
    /// The handler panicked.
    #[error("panicked: {0}")]
    Panic(String),
}

/// Extract a human-readable message from a panic payload.
///
/// Panics carry either `&str` or `String` payloads; anything else gets a
/// generic message.
pub fn extract_panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
