//! Interactive test selection.
//!
//! The widget itself lives outside the library behind [`FuzzyWidget`]; this
//! module decides what to show it and how to read its answer.

use thiserror::Error;
use tracing::debug;

use crate::config::SelectorConfig;
use crate::ranking::RankedTests;

/// Errors reported by a fuzzy widget.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error("Selection failed: {0}")]
    Widget(String),
}

/// Case-insensitive substring match of `input` against `candidate`.
pub fn matches_query(candidate: &str, input: &str) -> bool {
    candidate.to_lowercase().contains(&input.to_lowercase())
}

/// One question for the widget.
pub struct PickRequest<'a> {
    /// Prompt shown above the list.
    pub title: &'a str,
    /// Candidates in presentation order.
    pub items: &'a [String],
    /// Visible rows.
    pub page_size: usize,
    /// Filter predicate: `(candidate, query)`.
    pub searcher: &'a dyn Fn(&str, &str) -> bool,
}

impl PickRequest<'_> {
    /// Indices of the items matching `query`, in presentation order.
    pub fn filter(&self, query: &str) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| (self.searcher)(item, query))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Interactive list picker.
///
/// Returns the chosen item, or `None` when the operator aborted. An empty
/// string is treated as an abort as well.
pub trait FuzzyWidget {
    fn pick(&mut self, request: &PickRequest<'_>) -> Result<Option<String>, SelectError>;
}

/// The operator's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub suite: String,
    /// Empty for flat tests and method-less suites.
    pub method: String,
}

impl Selection {
    pub fn new(suite: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            method: method.into(),
        }
    }

    /// Split a flattened `suite.method` entry on its first separator.
    pub fn from_flat(entry: &str) -> Self {
        match entry.split_once('.') {
            Some((suite, method)) => Self::new(suite, method),
            None => Self::new(entry, ""),
        }
    }
}

/// Drives the widget over ranked candidates.
pub struct Selector<'w, W: FuzzyWidget> {
    widget: &'w mut W,
    config: SelectorConfig,
}

impl<'w, W: FuzzyWidget> Selector<'w, W> {
    pub fn new(widget: &'w mut W, config: SelectorConfig) -> Self {
        Self { widget, config }
    }

    /// Ask the operator for one test.
    ///
    /// Large catalogues are picked suite first, then method; small ones from a
    /// single flattened list. `Ok(None)` means the operator cancelled.
    pub fn select(&mut self, tests: &RankedTests) -> Result<Option<Selection>, SelectError> {
        if tests.size() > self.config.flatten_threshold {
            self.select_two_step(tests)
        } else {
            self.select_flat(tests)
        }
    }

    fn select_two_step(&mut self, tests: &RankedTests) -> Result<Option<Selection>, SelectError> {
        let suites = tests.suite_names();
        let Some(suite) = self.ask("Select test suite", &suites)? else {
            return Ok(None);
        };

        let methods = tests.suite_methods(&suite);
        if methods.is_empty() {
            return Ok(Some(Selection::new(suite, "")));
        }

        let Some(method) = self.ask("Select test function", methods)? else {
            debug!(suite = %suite, "method selection cancelled");
            return Ok(None);
        };
        Ok(Some(Selection::new(suite, method)))
    }

    fn select_flat(&mut self, tests: &RankedTests) -> Result<Option<Selection>, SelectError> {
        let list = tests.flatten();
        let choice = self.ask("Select test function", &list)?;
        Ok(choice.map(|entry| Selection::from_flat(&entry)))
    }

    fn ask(&mut self, title: &str, items: &[String]) -> Result<Option<String>, SelectError> {
        let request = PickRequest {
            title,
            items,
            page_size: self.config.page_size,
            searcher: &matches_query,
        };
        let choice = self.widget.pick(&request)?;
        Ok(choice.filter(|c| !c.is_empty()))
    }
}
