//! Mutable staging nodes, linked up in any order and frozen into a [`Tree`].

use crate::tree::Tree;

/// A detached node under construction.
///
/// Children are moved into their parent, so a builder can never end up
/// attached to two parents. An attached child stays reachable through
/// [`append_child`](Self::append_child)'s return value or
/// [`child_mut`](Self::child_mut), so a tree can be linked top-down as well
/// as bottom-up. [`freeze_as_root`](Self::freeze_as_root) consumes the whole
/// subtree and returns the immutable, fully linked [`Tree`]; the builder is
/// gone afterwards, so mutating a frozen node does not type-check.
///
/// # Example
///
/// ```
/// use scrolltree::NodeBuilder;
///
/// let mut root = NodeBuilder::<()>::new("Root");
/// let sheet = root.append_child(NodeBuilder::new("Sheet1"));
/// sheet.append_child(NodeBuilder::new("Range"));
/// sheet.extend_children([NodeBuilder::new("Columns")]);
///
/// let tree = root.freeze_as_root();
/// assert_eq!(tree.len(), 4);
/// assert_eq!(tree.root().depth(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct NodeBuilder<A> {
    pub(crate) value: String,
    pub(crate) action: Option<A>,
    pub(crate) children: Vec<NodeBuilder<A>>,
}

impl<A> NodeBuilder<A> {
    /// Create a purely informational node.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            action: None,
            children: Vec::new(),
        }
    }

    /// Create a node that runs `action` when activated.
    pub fn with_action(value: impl Into<String>, action: A) -> Self {
        Self {
            value: value.into(),
            action: Some(action),
            children: Vec::new(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Append `child` after the existing children and return it, still
    /// open for more children.
    pub fn append_child(&mut self, child: NodeBuilder<A>) -> &mut NodeBuilder<A> {
        let index = self.children.len();
        self.children.push(child);
        &mut self.children[index]
    }

    /// The child at `index`, in insertion order.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut NodeBuilder<A>> {
        self.children.get_mut(index)
    }

    /// Append every builder of `children`, in order.
    pub fn extend_children(&mut self, children: impl IntoIterator<Item = NodeBuilder<A>>) {
        self.children.extend(children);
    }

    /// Chaining form of [`append_child`](Self::append_child).
    pub fn child(mut self, child: NodeBuilder<A>) -> Self {
        self.append_child(child);
        self
    }

    /// Chaining form of [`extend_children`](Self::extend_children).
    pub fn children(mut self, children: impl IntoIterator<Item = NodeBuilder<A>>) -> Self {
        self.extend_children(children);
        self
    }

    /// Link the subtree and freeze it, with `self` as the depth-0 root.
    pub fn freeze_as_root(self) -> Tree<A> {
        Tree::freeze(self)
    }
}
