//! Core parser trait for test declaration extraction.

use std::path::Path;

use super::error::DiscoveryError;
use super::model::TestCatalog;

/// Extracts the test catalogue of a single source file.
///
/// Implementations must distinguish two outcomes:
///
/// 1. **Convention violations**: a test root with the wrong shape. These are
///    returned as errors and abort the whole directory load.
/// 2. **Pattern mismatches**: anything that merely does not look like a suite
///    bootstrap or a suite method. These are classified, never reported.
pub trait DeclarationParser {
    /// Parse one file.
    ///
    /// # Arguments
    /// * `path` - Path of the file (used in error messages)
    /// * `content` - Source code content
    fn parse_file(&self, path: &Path, content: &str) -> Result<TestCatalog, DiscoveryError>;

    /// File name suffix this parser handles.
    fn test_file_suffix(&self) -> &str;

    /// Check if this parser handles the given file name.
    fn can_parse(&self, file_name: &str) -> bool {
        file_name.ends_with(self.test_file_suffix())
    }
}
