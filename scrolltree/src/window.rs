//! Fixed-height scroll window centred on the focus.
//!
//! The window is not stored anywhere: [`Viewport::render`] recomputes the
//! visible rows from the cursor every time, walking outward from the focus
//! with [`Node::previous`] and [`Node::next`]. It never needs to know how
//! large the tree is.

use crate::cursor::Cursor;
use crate::error::Error;
use crate::text::truncate_to_width;
use crate::tree::Node;

/// Indentation, in levels, of a row at the focus depth.
pub const INDENT_BASE: usize = 8;

/// Columns per indentation level.
pub const INDENT_WIDTH: usize = 4;

/// Marker for a node with children that is an ancestor of the focus.
pub const EXPANDED_MARKER: char = '-';

/// Marker for any other node with children.
pub const COLLAPSED_MARKER: char = '+';

/// One painted line of the window.
#[derive(Debug)]
pub struct Row<'t, A> {
    /// The node shown on this row; `None` for a blank row.
    pub node: Option<Node<'t, A>>,
    /// Indented label, already cut to the viewport width.
    pub text: String,
    /// Blank rows must be hidden or cleared by the host.
    pub visible: bool,
    /// The centre row, which always shows the focus.
    pub focused: bool,
}

impl<A> Row<'_, A> {
    fn blank() -> Self {
        Self {
            node: None,
            text: String::new(),
            visible: false,
            focused: false,
        }
    }
}

/// Number of rows and width of the scroll window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    line_count: usize,
    width: usize,
}

impl Viewport {
    /// Largest accepted `line_count`: the centre may not exceed [`INDENT_BASE`].
    pub const MAX_LINES: usize = 2 * INDENT_BASE + 1;

    pub fn new(line_count: usize, width: usize) -> Result<Self, Error> {
        if line_count == 0 {
            return Err(Error::EmptyViewport);
        }
        if line_count / 2 > INDENT_BASE {
            return Err(Error::ViewportTooTall {
                line_count,
                max: Self::MAX_LINES,
            });
        }
        Ok(Self { line_count, width })
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Index of the row showing the focus.
    pub fn center(&self) -> usize {
        self.line_count / 2
    }

    /// Compute the `line_count` rows around the cursor's focus.
    ///
    /// Rows above the centre follow `previous()`, rows below follow
    /// `next()`. The first step that finds nothing blanks that row and every
    /// row further out.
    pub fn render<'t, A>(&self, cursor: &'t Cursor<A>) -> Vec<Row<'t, A>> {
        let focus = cursor.focus();
        let center = self.center();

        let mut rows: Vec<Row<'t, A>> = (0..self.line_count).map(|_| Row::blank()).collect();
        rows[center] = self.row(focus, focus, true);

        let mut node = focus;
        for index in (0..center).rev() {
            let Some(previous) = node.previous() else { break };
            rows[index] = self.row(focus, previous, false);
            node = previous;
        }

        let mut node = focus;
        for index in center + 1..self.line_count {
            let Some(next) = node.next() else { break };
            rows[index] = self.row(focus, next, false);
            node = next;
        }

        log::trace!(
            "[window] focus={} visible={}",
            focus.id(),
            rows.iter().filter(|row| row.visible).count()
        );
        rows
    }

    fn row<'t, A>(&self, focus: Node<'t, A>, node: Node<'t, A>, focused: bool) -> Row<'t, A> {
        Row {
            node: Some(node),
            text: truncate_to_width(&row_text(focus, node), self.width),
            visible: true,
            focused,
        }
    }
}

/// Label of `node` as seen from `focus`.
///
/// Indentation is relative to the focus depth, so the hierarchy stays
/// readable however deep the focus is. Nodes with children get a marker:
/// `-` on the focus's ancestors, `+` everywhere else. Nodes far shallower
/// than the focus are clamped to no indentation.
pub fn row_text<A>(focus: Node<'_, A>, node: Node<'_, A>) -> String {
    let levels = (INDENT_BASE + node.depth()).saturating_sub(focus.depth());
    let mut text = " ".repeat(INDENT_WIDTH * levels);
    text.push_str(node.value());
    if node.has_children() {
        let marker = if node.is_ancestor_of(focus) {
            EXPANDED_MARKER
        } else {
            COLLAPSED_MARKER
        };
        text.push(' ');
        text.push(marker);
    }
    text
}
