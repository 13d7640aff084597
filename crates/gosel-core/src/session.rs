//! The select-and-run pipeline.
//!
//! Discovery, ranking, selection and command synthesis run strictly in that
//! order. History is read once before ranking and written once after a
//! complete selection; a cancelled selection touches neither history nor the
//! executor.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::command::{absolutize, CommandSynthesizer, RunMode};
use crate::config::Config;
use crate::discovery::{DiscoveryError, TestLoader};
use crate::history::{HistoryEntry, HistoryError, HistoryStore};
use crate::ranking::rank;
use crate::selection::{FuzzyWidget, SelectError, Selection, Selector};

/// Errors that abort a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error(transparent)]
    Select(#[from] SelectError),

    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run `{command}`: {source}")]
    Execute {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs a synthesized command line.
pub trait CommandExecutor {
    /// Execute `command` and return its exit code, if it exited normally.
    fn execute(&mut self, command: &str) -> std::io::Result<Option<i32>>;
}

/// What to scan and how to run the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Absolute directory containing the test files.
    pub dir: PathBuf,
    /// Narrow the scan to this file name.
    pub file: Option<String>,
    pub mode: RunMode,
}

impl Target {
    /// Resolve a user supplied path (directory or file) against `working_dir`.
    ///
    /// A file path selects its parent directory and narrows the scan to it.
    pub fn resolve(path: Option<&Path>, mode: RunMode, working_dir: &Path) -> Result<Self, SessionError> {
        let path = absolutize(path.unwrap_or(Path::new(".")), working_dir);
        let metadata = fs::metadata(&path).map_err(|e| SessionError::Io {
            path: path.clone(),
            source: e,
        })?;

        if metadata.is_dir() {
            return Ok(Self {
                dir: path,
                file: None,
                mode,
            });
        }

        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string());
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| working_dir.to_path_buf());
        Ok(Self { dir, file, mode })
    }

    /// Key under which this directory's history is stored.
    ///
    /// Symlinks are resolved so every path to a directory shares one entry.
    pub fn history_key(&self) -> String {
        fs::canonicalize(&self.dir)
            .unwrap_or_else(|_| self.dir.clone())
            .to_string_lossy()
            .to_string()
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The directory has no tests.
    NoTests,
    /// The operator aborted the selection.
    Cancelled,
    /// Dry run: the command was built but not executed.
    Printed { selection: Selection, command: String },
    /// The command was executed.
    Ran {
        selection: Selection,
        command: String,
        exit_code: Option<i32>,
    },
}

/// One select-and-run invocation.
pub struct TestSession<'a, H, W, E>
where
    H: HistoryStore,
    W: FuzzyWidget,
    E: CommandExecutor,
{
    config: &'a Config,
    history: &'a mut H,
    widget: &'a mut W,
    executor: &'a mut E,
    working_dir: PathBuf,
    dry_run: bool,
}

impl<'a, H, W, E> TestSession<'a, H, W, E>
where
    H: HistoryStore,
    W: FuzzyWidget,
    E: CommandExecutor,
{
    pub fn new(
        config: &'a Config,
        history: &'a mut H,
        widget: &'a mut W,
        executor: &'a mut E,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            config,
            history,
            widget,
            executor,
            working_dir: working_dir.into(),
            dry_run: false,
        }
    }

    /// Build and record the command without executing it.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Discover, rank, select, synthesize and run.
    pub fn run(&mut self, target: &Target) -> Result<SessionOutcome, SessionError> {
        let loader = TestLoader::new(self.config.discovery.clone());
        let catalog = loader.load(&target.dir, target.file.as_deref())?;
        if catalog.is_empty() {
            info!(dir = %target.dir.display(), "No tests found");
            return Ok(SessionOutcome::NoTests);
        }

        let key = target.history_key();
        let last = self.history.get(&key)?;
        let ranked = rank(&catalog, last.as_ref());

        let selection = Selector::new(&mut *self.widget, self.config.selector.clone())
            .select(&ranked)?;
        let Some(selection) = selection else {
            info!("selection cancelled");
            return Ok(SessionOutcome::Cancelled);
        };

        let command = CommandSynthesizer::new(self.config.command.clone()).synthesize(
            &target.dir,
            &selection,
            target.mode,
            &self.working_dir,
        );

        self.history.append(HistoryEntry::new(
            key,
            selection.suite.clone(),
            selection.method.clone(),
        ))?;

        info!(mode = %target.mode, "{}", command);
        if self.dry_run {
            return Ok(SessionOutcome::Printed { selection, command });
        }

        let exit_code = self
            .executor
            .execute(&command)
            .map_err(|source| SessionError::Execute {
                command: command.clone(),
                source,
            })?;

        Ok(SessionOutcome::Ran {
            selection,
            command,
            exit_code,
        })
    }
}
