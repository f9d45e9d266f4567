use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent, KeyEventKind},
    queue,
    style::{Attribute, Print, SetAttribute},
    terminal,
};

use crate::key::Key;
use crate::text::truncate_to_width;
use crate::window::Row;

/// Paints window rows at fixed lines of the terminal.
///
/// Enters raw mode and the alternate screen on creation and restores the
/// terminal when dropped.
pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        crossterm::execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Block until a key is pressed.
    /// Returns `None` for anything that is not a key press (resize, release).
    pub fn read_key(&self) -> io::Result<Option<Key>> {
        match event::read()? {
            CrosstermEvent::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                Ok(Some(key_event.code.into()))
            }
            _ => Ok(None),
        }
    }

    /// Paint `rows` from the top line down and `status` below them.
    ///
    /// Every line is cleared first, so a row that became invisible never
    /// keeps its previous label. The focused row is bold.
    pub fn draw<A>(&mut self, rows: &[Row<'_, A>], status: &str) -> io::Result<()> {
        let (width, _) = terminal::size()?;

        for (y, row) in rows.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y as u16),
                terminal::Clear(terminal::ClearType::CurrentLine)
            )?;
            if !row.visible {
                continue;
            }
            if row.focused {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            queue!(self.stdout, Print(&row.text))?;
            if row.focused {
                queue!(self.stdout, SetAttribute(Attribute::NormalIntensity))?;
            }
        }

        let status_line = rows.len() as u16 + 1;
        queue!(
            self.stdout,
            cursor::MoveTo(0, status_line),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetAttribute(Attribute::Dim),
            Print(truncate_to_width(status, width as usize)),
            SetAttribute(Attribute::Reset)
        )?;

        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = crossterm::execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
