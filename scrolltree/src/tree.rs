//! Frozen, fully linked trees.
//!
//! All nodes of a tree live in one arena owned by [`Tree`], stored in
//! depth-first pre-order. Links between nodes are [`NodeId`] indices, so
//! parent and sibling back-references never form an ownership cycle.
//! [`Node`] is a cheap borrowed handle used for navigation.

use std::fmt;
use std::iter::FusedIterator;

use crate::builder::NodeBuilder;
use crate::error::StructureError;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root of every tree.
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug)]
struct NodeData<A> {
    value: String,
    action: Option<A>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    depth: usize,
    previous_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

/// An immutable tree produced by [`NodeBuilder::freeze_as_root`].
///
/// Nothing in a tree changes after the freeze, so it can be shared behind an
/// `Arc` by any number of readers.
#[derive(Debug)]
pub struct Tree<A> {
    nodes: Vec<NodeData<A>>,
}

impl<A> Tree<A> {
    /// Assign depth, parent and sibling links to every node of `root`'s
    /// subtree in a single depth-first pre-order pass.
    pub(crate) fn freeze(root: NodeBuilder<A>) -> Self {
        let mut nodes: Vec<NodeData<A>> = Vec::new();
        // Children are pushed in reverse so the first child is popped first.
        let mut stack = vec![(root, None::<NodeId>, 0usize)];

        while let Some((builder, parent, depth)) = stack.pop() {
            let id = NodeId(nodes.len());

            let mut previous_sibling = None;
            if let Some(parent) = parent {
                previous_sibling = nodes[parent.0].children.last().copied();
                if let Some(previous) = previous_sibling {
                    nodes[previous.0].next_sibling = Some(id);
                }
                nodes[parent.0].children.push(id);
            }

            let NodeBuilder {
                value,
                action,
                children,
            } = builder;

            nodes.push(NodeData {
                value,
                action,
                children: Vec::with_capacity(children.len()),
                parent,
                depth,
                previous_sibling,
                next_sibling: None,
            });

            for child in children.into_iter().rev() {
                stack.push((child, Some(id), depth + 1));
            }
        }

        let tree = Self { nodes };
        log::debug!("[tree] froze {} nodes", tree.len());
        debug_assert_eq!(tree.validate(), Ok(()));
        tree
    }

    pub fn root(&self) -> Node<'_, A> {
        Node {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Look up a node; `None` if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> Option<Node<'_, A>> {
        self.contains(id).then_some(Node { tree: self, id })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a frozen tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Every node in depth-first pre-order, starting at the root.
    pub fn preorder(&self) -> Preorder<'_, A> {
        Preorder {
            tree: self,
            range: 0..self.nodes.len(),
        }
    }

    /// Check every structural invariant of a frozen tree.
    ///
    /// A tree built through [`NodeBuilder`] always passes; this exists for
    /// tests and debug assertions.
    pub fn validate(&self) -> Result<(), StructureError> {
        let root = &self.nodes[NodeId::ROOT.0];
        if root.depth != 0 {
            return Err(StructureError::RootDepth(root.depth));
        }
        if root.parent.is_some() || root.previous_sibling.is_some() || root.next_sibling.is_some()
        {
            return Err(StructureError::RootLinked);
        }

        // How often each node appears in some child list
        let mut listed = vec![0usize; self.nodes.len()];
        for data in &self.nodes {
            for child in &data.children {
                match listed.get_mut(child.0) {
                    Some(count) => *count += 1,
                    None => return Err(StructureError::Orphan(*child)),
                }
            }
        }

        for (index, data) in self.nodes.iter().enumerate().skip(1) {
            let node = NodeId(index);
            let Some(parent) = data.parent.filter(|p| self.contains(*p)) else {
                return Err(StructureError::Orphan(node));
            };
            match listed[index] {
                0 => return Err(StructureError::Detached { node, parent }),
                1 => {}
                count => return Err(StructureError::DuplicateChild { node, count }),
            }
        }

        for (index, data) in self.nodes.iter().enumerate() {
            let parent = NodeId(index);
            for (position, &node) in data.children.iter().enumerate() {
                let child = &self.nodes[node.0];
                if let Some(claimed) = child.parent.filter(|p| *p != parent) {
                    return Err(StructureError::Detached {
                        node,
                        parent: claimed,
                    });
                }
                if child.parent.is_none() {
                    return Err(StructureError::Orphan(node));
                }
                if child.depth != data.depth + 1 {
                    return Err(StructureError::Depth {
                        node,
                        depth: child.depth,
                        expected: data.depth + 1,
                    });
                }

                let expected_previous = position.checked_sub(1).map(|p| data.children[p]);
                let expected_next = data.children.get(position + 1).copied();
                if child.previous_sibling != expected_previous
                    || child.next_sibling != expected_next
                {
                    return Err(StructureError::SiblingLinks(node));
                }
            }
        }

        Ok(())
    }
}

/// A borrowed handle to one node of a [`Tree`].
///
/// Two handles are equal when they point at the same node of the same tree.
pub struct Node<'t, A> {
    tree: &'t Tree<A>,
    id: NodeId,
}

impl<A> Clone for Node<'_, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A> Copy for Node<'_, A> {}

impl<A> PartialEq for Node<'_, A> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<A> Eq for Node<'_, A> {}

impl<'t, A> Node<'t, A> {
    fn data(&self) -> &'t NodeData<A> {
        &self.tree.nodes[self.id.0]
    }

    fn at(&self, id: Option<NodeId>) -> Option<Node<'t, A>> {
        id.map(|id| Node {
            tree: self.tree,
            id,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t Tree<A> {
        self.tree
    }

    /// Display label, already formatted by whoever built the tree.
    pub fn value(&self) -> &'t str {
        &self.data().value
    }

    pub fn action(&self) -> Option<&'t A> {
        self.data().action.as_ref()
    }

    /// 0 for the root, parent depth + 1 otherwise.
    pub fn depth(&self) -> usize {
        self.data().depth
    }

    pub fn parent(&self) -> Option<Node<'t, A>> {
        self.at(self.data().parent)
    }

    pub fn previous_sibling(&self) -> Option<Node<'t, A>> {
        self.at(self.data().previous_sibling)
    }

    pub fn next_sibling(&self) -> Option<Node<'t, A>> {
        self.at(self.data().next_sibling)
    }

    pub fn children(&self) -> Children<'t, A> {
        Children {
            tree: self.tree,
            ids: self.data().children.iter(),
        }
    }

    pub fn first_child(&self) -> Option<Node<'t, A>> {
        self.at(self.data().children.first().copied())
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.data().children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.data().parent.is_none()
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(&self) -> Ancestors<'t, A> {
        Ancestors {
            next: self.parent(),
        }
    }

    /// True if `self` is on `other`'s parent chain (never for `self == other`).
    pub fn is_ancestor_of(&self, other: Node<'t, A>) -> bool {
        other.ancestors().any(|ancestor| ancestor == *self)
    }

    /// The previous sibling, or the parent when there is none.
    ///
    /// From a first child this steps out to the parent itself rather than
    /// to the parent's previous sibling, so it is not the inverse of
    /// [`next`](Self::next) across a level boundary.
    pub fn previous(&self) -> Option<Node<'t, A>> {
        self.previous_sibling().or_else(|| self.parent())
    }

    /// The next sibling of the nearest node on the path from `self` up to
    /// the root that has one. Children are never entered.
    pub fn next(&self) -> Option<Node<'t, A>> {
        let mut current = Some(*self);
        while let Some(node) = current {
            if let Some(sibling) = node.next_sibling() {
                return Some(sibling);
            }
            current = node.parent();
        }
        None
    }
}

impl<A> fmt::Debug for Node<'_, A> {
    /// `Node(#id, value, depth, parent, prev, next, [children])`, with `-`
    /// for a missing link.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn link(id: Option<NodeId>) -> String {
            id.map_or_else(|| "-".to_string(), |id| id.to_string())
        }

        let data = self.data();
        let children: Vec<String> = data.children.iter().map(ToString::to_string).collect();
        write!(
            f,
            "Node({}, {:?}, {}, {}, {}, {}, [{}])",
            self.id,
            data.value,
            data.depth,
            link(data.parent),
            link(data.previous_sibling),
            link(data.next_sibling),
            children.join(", ")
        )
    }
}

/// Iterator over the children of a node, in insertion order.
pub struct Children<'t, A> {
    tree: &'t Tree<A>,
    ids: std::slice::Iter<'t, NodeId>,
}

impl<'t, A> Iterator for Children<'t, A> {
    type Item = Node<'t, A>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.ids.next().map(|&id| Node { tree, id })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<A> DoubleEndedIterator for Children<'_, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.ids.next_back().map(|&id| Node { tree, id })
    }
}

impl<A> ExactSizeIterator for Children<'_, A> {}

impl<A> FusedIterator for Children<'_, A> {}

/// Iterator over the strict ancestors of a node, nearest first.
pub struct Ancestors<'t, A> {
    next: Option<Node<'t, A>>,
}

impl<'t, A> Iterator for Ancestors<'t, A> {
    type Item = Node<'t, A>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.parent();
        Some(node)
    }
}

impl<A> FusedIterator for Ancestors<'_, A> {}

/// Depth-first pre-order walk over a whole tree.
pub struct Preorder<'t, A> {
    tree: &'t Tree<A>,
    range: std::ops::Range<usize>,
}

impl<'t, A> Iterator for Preorder<'t, A> {
    type Item = Node<'t, A>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        self.range.next().map(|index| Node {
            tree,
            id: NodeId(index),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl<A> ExactSizeIterator for Preorder<'_, A> {}

impl<A> FusedIterator for Preorder<'_, A> {}
