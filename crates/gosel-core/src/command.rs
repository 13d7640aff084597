//! Shell command synthesis for a selected test.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::config::CommandConfig;
use crate::selection::Selection;

/// How the selected test is run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Run through the test runner directly.
    #[default]
    Direct,
    /// Run under the debugger.
    Debug,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Debug => write!(f, "debug"),
        }
    }
}

/// Builds the command line that runs one selected test.
pub struct CommandSynthesizer {
    config: CommandConfig,
}

impl CommandSynthesizer {
    pub fn new(config: CommandConfig) -> Self {
        Self { config }
    }

    /// Build the command for `selection` in `dir`, as seen from `working_dir`.
    ///
    /// ```text
    /// [cd '<dir>' && ] <runner> --test.run '^<suite>$' [--testify.m '^<method>$'] --test.v
    /// ```
    pub fn synthesize(
        &self,
        dir: &Path,
        selection: &Selection,
        mode: RunMode,
        working_dir: &Path,
    ) -> String {
        let runner = match mode {
            RunMode::Direct => &self.config.runner,
            RunMode::Debug => &self.config.debug_runner,
        };

        let mut parts = vec![
            runner.trim().to_string(),
            self.config.suite_flag.clone(),
            shell_quote(&anchored(&selection.suite)),
        ];
        if !selection.method.is_empty() {
            parts.push(self.config.method_flag.clone());
            parts.push(shell_quote(&anchored(&selection.method)));
        }
        parts.push(self.config.verbose_flag.clone());
        let command = parts.join(" ");

        let working_dir = normalize(working_dir);
        let target = absolutize(dir, &working_dir);
        if target == working_dir {
            return command;
        }

        let cd_dir = match target.strip_prefix(&working_dir) {
            Ok(relative) if !working_dir.as_os_str().is_empty() => relative.to_path_buf(),
            _ => dir.to_path_buf(),
        };
        format!(
            "cd {} && {}",
            shell_quote(&cd_dir.to_string_lossy()),
            command
        )
    }

    /// [`synthesize`](Self::synthesize) relative to the process working directory.
    pub fn synthesize_from_cwd(
        &self,
        dir: &Path,
        selection: &Selection,
        mode: RunMode,
    ) -> std::io::Result<String> {
        let working_dir = std::env::current_dir()?;
        Ok(self.synthesize(dir, selection, mode, &working_dir))
    }
}

/// Whole-match regex for a test name.
fn anchored(name: &str) -> String {
    format!("^{}$", name)
}

/// Single-quote a shell word.
pub fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// `path` made absolute against `base`, without touching the filesystem.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Lexically resolve `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
