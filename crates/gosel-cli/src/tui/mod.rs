//! Terminal fuzzy picker.
//!
//! Provides an interactive list with:
//! - A query line filtering candidates as you type
//! - Cursor movement and paging over the matches
//! - Enter to choose, Esc to cancel

mod app;
mod event;
mod ui;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, stderr, Stderr, Write};

use gosel_core::{FuzzyWidget, PickRequest, SelectError};

use app::{Picker, Step};

/// `FuzzyWidget` drawing on the alternate screen of stderr.
///
/// Stdout stays untouched so the printed command can be captured.
#[derive(Default)]
pub struct TerminalWidget;

impl TerminalWidget {
    pub fn new() -> Self {
        Self
    }
}

impl FuzzyWidget for TerminalWidget {
    fn pick(&mut self, request: &PickRequest<'_>) -> Result<Option<String>, SelectError> {
        enable_raw_mode()?;
        // Restores the terminal on every exit path from here on, panics included.
        let _guard = TerminalGuard::new(stderr());

        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stderr))?;

        run(&mut terminal, request)
    }
}

/// Leaves raw mode and the alternate screen when dropped.
struct TerminalGuard<W: Write> {
    out: W,
}

impl<W: Write> TerminalGuard<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(e) = restore(&mut self.out) {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

fn restore<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(out, LeaveAlternateScreen, Show)?;
    raw
}

/// Draw and handle keys until the operator chooses or cancels.
fn run(
    terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    request: &PickRequest<'_>,
) -> Result<Option<String>, SelectError> {
    let mut picker = Picker::new(request);

    loop {
        terminal.draw(|frame| ui::render(&picker, frame))?;

        let key = event::next_key()?;
        if let Step::Done(choice) = picker.handle_key(key) {
            return Ok(choice);
        }
    }
}
