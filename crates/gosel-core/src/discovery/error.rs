//! Test discovery error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a directory load.
///
/// Pattern mismatches during extraction are never errors; only convention
/// violations and unreadable or unparsable files end up here.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// IO error.
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Tree-sitter could not be set up for the language.
    #[error("Failed to set language: {0}")]
    Language(String),

    /// File contains syntax errors.
    #[error("Parse error in {}: {message}", path.display())]
    Syntax { path: PathBuf, message: String },

    /// A test root does not follow the expected declaration convention.
    #[error("Convention violation in {}: {function}: {reason}", path.display())]
    Convention {
        path: PathBuf,
        function: String,
        reason: String,
    },
}

impl DiscoveryError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiscoveryError::Io {
            path: path.into(),
            source,
        }
    }

    /// True for errors caused by the source code rather than the environment.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DiscoveryError::Syntax { .. } | DiscoveryError::Convention { .. }
        )
    }
}
