//! A navigable, immutable tree with a fixed-height scroll window.
//!
//! Trees are staged with [`NodeBuilder`], frozen once into a [`Tree`], and
//! browsed with a [`Cursor`] driven by four directional moves plus
//! activation. [`Viewport::render`] turns the cursor's focus into a fixed
//! number of rows for the host to paint.

pub mod builder;
pub mod cursor;
pub mod error;
pub mod key;
pub mod terminal;
pub mod text;
pub mod tree;
pub mod window;

pub use builder::NodeBuilder;
pub use cursor::{ActionHandler, Cursor, Invoke};
pub use error::{ActionError, ActionFailure, Error, FailureKind, StructureError};
pub use key::{handle_key, Key, Nav};
pub use terminal::Terminal;
pub use tree::{Node, NodeId, Tree};
pub use window::{row_text, Row, Viewport};
