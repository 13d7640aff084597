//! Picker state and key handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use gosel_core::PickRequest;

/// Result of handling one key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue,
    /// `None` when cancelled.
    Done(Option<String>),
}

/// State of one pick.
pub struct Picker<'r, 'a> {
    request: &'r PickRequest<'a>,
    /// Current query
    pub query: String,
    /// Indices into `request.items` matching the query
    matches: Vec<usize>,
    /// Position of the cursor within `matches`
    pub cursor: usize,
    /// First visible position within `matches`
    pub offset: usize,
}

impl<'r, 'a> Picker<'r, 'a> {
    pub fn new(request: &'r PickRequest<'a>) -> Self {
        let matches = request.filter("");
        Self {
            request,
            query: String::new(),
            matches,
            cursor: 0,
            offset: 0,
        }
    }

    pub fn title(&self) -> &str {
        self.request.title
    }

    pub fn total(&self) -> usize {
        self.request.items.len()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    fn page_size(&self) -> usize {
        self.request.page_size.max(1)
    }

    /// Visible rows as `(item, is_cursor)`.
    pub fn visible(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.matches
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(self.page_size())
            .map(move |(pos, &index)| (self.request.items[index].as_str(), pos == self.cursor))
    }

    /// Item under the cursor.
    pub fn current(&self) -> Option<&str> {
        self.matches
            .get(self.cursor)
            .map(|&index| self.request.items[index].as_str())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Step {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Step::Done(None),
            KeyCode::Char('c') if ctrl => return Step::Done(None),
            KeyCode::Enter => {
                if let Some(item) = self.current() {
                    return Step::Done(Some(item.to_string()));
                }
            }
            KeyCode::Up => self.move_by(-1),
            KeyCode::Char('p') | KeyCode::Char('k') if ctrl => self.move_by(-1),
            KeyCode::Down => self.move_by(1),
            KeyCode::Char('n') | KeyCode::Char('j') if ctrl => self.move_by(1),
            KeyCode::PageUp => self.move_by(-(self.page_size() as isize)),
            KeyCode::PageDown => self.move_by(self.page_size() as isize),
            KeyCode::Char('u') if ctrl => {
                self.query.clear();
                self.refilter();
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.refilter();
            }
            KeyCode::Char(c) if !ctrl => {
                self.query.push(c);
                self.refilter();
            }
            _ => {}
        }
        Step::Continue
    }

    fn refilter(&mut self) {
        self.matches = self.request.filter(&self.query);
        self.cursor = 0;
        self.offset = 0;
    }

    fn move_by(&mut self, delta: isize) {
        if self.matches.is_empty() {
            return;
        }
        let last = self.matches.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);

        let page = self.page_size();
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + page {
            self.offset = self.cursor + 1 - page;
        }
    }
}
