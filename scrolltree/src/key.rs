use crate::cursor::{ActionHandler, Cursor};

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Tab,
    Other,
}

/// The five moves a cursor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nav {
    /// Next sibling.
    Down,
    /// Previous sibling.
    Up,
    /// Parent.
    Right,
    /// First child.
    Left,
    /// Run the focused node's action.
    Enter,
}

impl Nav {
    /// Arrow keys and Enter map to a move; every other key is ignored.
    pub fn from_key(key: Key) -> Option<Nav> {
        match key {
            Key::Down => Some(Nav::Down),
            Key::Up => Some(Nav::Up),
            Key::Right => Some(Nav::Right),
            Key::Left => Some(Nav::Left),
            Key::Enter => Some(Nav::Enter),
            _ => None,
        }
    }
}

/// Dispatch one key to the cursor.
///
/// Returns the move that was applied, or `None` when `key` is not a
/// navigation key. A move with no target still counts as applied.
pub fn handle_key<A, H>(cursor: &mut Cursor<A>, key: Key, handler: &mut H) -> Option<Nav>
where
    H: ActionHandler<A> + ?Sized,
{
    let nav = Nav::from_key(key)?;
    let moved = cursor.navigate(nav, handler);
    log::debug!(
        "[key] {:?} -> {:?} moved={} focus={}",
        key,
        nav,
        moved,
        cursor.focus_id()
    );
    Some(nav)
}

// Conversion from crossterm types
impl From<crossterm::event::KeyCode> for Key {
    fn from(code: crossterm::event::KeyCode) -> Self {
        use crossterm::event::KeyCode;
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::Tab => Key::Tab,
            _ => Key::Other,
        }
    }
}
