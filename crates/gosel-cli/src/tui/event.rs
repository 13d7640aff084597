//! Event handling for the picker.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

/// Block until the next key press.
///
/// Release and repeat events, resizes and mouse input are skipped; the next
/// draw picks up a new terminal size on its own.
pub fn next_key() -> std::io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            // Only handle key press events, not release
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}
