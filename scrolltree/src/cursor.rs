use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::{extract_panic_message, ActionError, ActionFailure, FailureKind};
use crate::key::Nav;
use crate::tree::{Node, NodeId, Tree};

/// Resolves the action carried by a node into host-side work.
///
/// The tree only stores the action value; what activating it means (moving a
/// selection, focusing a control) is up to the handler.
pub trait ActionHandler<A: ?Sized> {
    fn perform(&mut self, action: &A) -> Result<(), ActionError>;
}

impl<A, F> ActionHandler<A> for F
where
    A: ?Sized,
    F: FnMut(&A) -> Result<(), ActionError>,
{
    fn perform(&mut self, action: &A) -> Result<(), ActionError> {
        self(action)
    }
}

/// Handler for trees whose actions are plain callbacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Invoke;

impl<F> ActionHandler<F> for Invoke
where
    F: Fn() -> Result<(), ActionError>,
{
    fn perform(&mut self, action: &F) -> Result<(), ActionError> {
        action()
    }
}

type ErrorReporter = Box<dyn Fn(&ActionFailure)>;

/// Tracks the focused node of a frozen tree and moves it around.
///
/// Every move is total: when a move has no target the focus stays where it
/// is and the move returns `false`.
pub struct Cursor<A> {
    tree: Arc<Tree<A>>,
    focus: NodeId,
    on_error: Option<ErrorReporter>,
}

impl<A> Cursor<A> {
    /// Start with the focus on the root.
    pub fn new(tree: impl Into<Arc<Tree<A>>>) -> Self {
        Self {
            tree: tree.into(),
            focus: NodeId::ROOT,
            on_error: None,
        }
    }

    /// Install a reporter that receives every contained action failure.
    pub fn on_error(mut self, report: impl Fn(&ActionFailure) + 'static) -> Self {
        self.on_error = Some(Box::new(report));
        self
    }

    /// Shared handle to the tree, for readers running alongside the cursor.
    pub fn tree(&self) -> &Arc<Tree<A>> {
        &self.tree
    }

    pub fn root(&self) -> Node<'_, A> {
        self.tree.root()
    }

    pub fn focus(&self) -> Node<'_, A> {
        self.tree.node(self.focus).unwrap_or_else(|| self.tree.root())
    }

    pub fn focus_id(&self) -> NodeId {
        self.focus
    }

    /// Programmatically focus a node.
    /// Returns true if focus changed; ids past the end of the tree are ignored.
    pub fn set_focus(&mut self, id: NodeId) -> bool {
        if !self.tree.contains(id) {
            log::warn!("[cursor] ignoring focus on unknown node {id}");
            return false;
        }
        self.move_to(Some(id))
    }

    /// Move to the next sibling.
    pub fn down(&mut self) -> bool {
        let target = self.focus().next_sibling().map(|n| n.id());
        self.move_to(target)
    }

    /// Move to the previous sibling.
    pub fn up(&mut self) -> bool {
        let target = self.focus().previous_sibling().map(|n| n.id());
        self.move_to(target)
    }

    /// Move out to the parent.
    pub fn right(&mut self) -> bool {
        let target = self.focus().parent().map(|n| n.id());
        self.move_to(target)
    }

    /// Move in to the first child.
    pub fn left(&mut self) -> bool {
        let target = self.focus().first_child().map(|n| n.id());
        self.move_to(target)
    }

    /// Run the focused node's action, if it has one.
    ///
    /// Failures (returned errors and panics alike) are contained: they are
    /// logged, passed to the `on_error` reporter, and never reach the caller.
    /// The focus does not move.
    pub fn enter<H>(&self, handler: &mut H)
    where
        H: ActionHandler<A> + ?Sized,
    {
        let node = self.focus();
        let Some(action) = node.action() else {
            log::debug!("[cursor] {:?} has no action", node.value());
            return;
        };

        log::debug!("[cursor] execute action of {:?}", node.value());
        let kind = match panic::catch_unwind(AssertUnwindSafe(|| handler.perform(action))) {
            Ok(Ok(())) => return,
            Ok(Err(error)) => FailureKind::Error(error),
            Err(panic) => FailureKind::Panic(extract_panic_message(&*panic)),
        };

        let failure = ActionFailure {
            node: node.id(),
            value: node.value().to_string(),
            kind,
        };
        log::error!("[cursor] {failure}");
        if let Some(report) = &self.on_error {
            report(&failure);
        }
    }

    /// Apply one of the five transitions.
    /// Returns true if focus changed (never for [`Nav::Enter`]).
    pub fn navigate<H>(&mut self, nav: Nav, handler: &mut H) -> bool
    where
        H: ActionHandler<A> + ?Sized,
    {
        match nav {
            Nav::Down => self.down(),
            Nav::Up => self.up(),
            Nav::Right => self.right(),
            Nav::Left => self.left(),
            Nav::Enter => {
                self.enter(handler);
                false
            }
        }
    }

    fn move_to(&mut self, target: Option<NodeId>) -> bool {
        match target {
            Some(id) if id != self.focus => {
                log::trace!("[cursor] focus {} -> {}", self.focus, id);
                self.focus = id;
                true
            }
            _ => false,
        }
    }
}

impl<A> fmt::Debug for Cursor<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("focus", &self.focus)
            .field("value", &self.focus().value())
            .field("nodes", &self.tree.len())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}
