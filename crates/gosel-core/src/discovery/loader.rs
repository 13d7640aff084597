//! Directory scanning and catalogue aggregation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::DiscoveryError;
use super::go::GoTestParser;
use super::model::TestCatalog;
use super::traits::DeclarationParser;
use crate::config::DiscoveryConfig;

/// Loads the test catalogue of one directory.
pub struct TestLoader<P: DeclarationParser = GoTestParser> {
    parser: P,
}

impl TestLoader<GoTestParser> {
    /// Creates a loader for Go test files.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            parser: GoTestParser::with_config(config),
        }
    }
}

impl<P: DeclarationParser> TestLoader<P> {
    /// Creates a loader around a custom parser.
    pub fn with_parser(parser: P) -> Self {
        Self { parser }
    }

    /// Test files of `dir` in file name order.
    ///
    /// With `file` set, only that file name is considered.
    pub fn test_files(&self, dir: &Path, file: Option<&str>) -> Result<Vec<PathBuf>, DiscoveryError> {
        let entries = fs::read_dir(dir).map_err(|e| DiscoveryError::io(dir, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DiscoveryError::io(dir, e))?;
            let file_type = entry.file_type().map_err(|e| DiscoveryError::io(entry.path(), e))?;
            if file_type.is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if !self.parser.can_parse(&name) {
                continue;
            }
            if file.is_some_and(|f| f != name) {
                continue;
            }
            files.push(entry.path());
        }

        files.sort();
        Ok(files)
    }

    /// Parse every test file of `dir` and merge the results.
    ///
    /// The first failing file aborts the load; no partial catalogue is returned.
    pub fn load(&self, dir: &Path, file: Option<&str>) -> Result<TestCatalog, DiscoveryError> {
        let files = self.test_files(dir, file)?;
        debug!(dir = %dir.display(), files = files.len(), "scanning test files");

        let mut catalog = TestCatalog::new();
        for path in &files {
            let content = fs::read_to_string(path).map_err(|e| DiscoveryError::io(path, e))?;
            catalog = catalog.merge(self.parser.parse_file(path, &content)?);
        }

        info!(
            dir = %dir.display(),
            roots = catalog.len(),
            size = catalog.size(),
            "loaded tests"
        );
        Ok(catalog)
    }
}
