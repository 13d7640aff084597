//! Default values for gosel configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// Discovery Defaults
// ============================================================================

/// Suffix that marks a file as a Go test file.
pub const DEFAULT_TEST_FILE_SUFFIX: &str = "_test.go";

/// Prefix shared by test roots and suite methods.
pub const DEFAULT_TEST_PREFIX: &str = "Test";

/// Package of the test context type (`*testing.T`).
pub const DEFAULT_CONTEXT_PACKAGE: &str = "testing";

/// Name of the test context type (`*testing.T`).
pub const DEFAULT_CONTEXT_TYPE: &str = "T";

/// Prefixed functions that are harness hooks rather than tests.
pub const DEFAULT_IGNORED_FUNCTIONS: &[&str] = &["TestMain"];

// ============================================================================
// Selector Defaults
// ============================================================================

/// Above this many selectable units, pick the suite first and the method second.
pub const DEFAULT_FLATTEN_THRESHOLD: usize = 20;

/// Number of rows the fuzzy widget shows at once.
pub const DEFAULT_PAGE_SIZE: usize = 20;

// ============================================================================
// Command Defaults
// ============================================================================

/// Runner used for plain runs.
pub const DEFAULT_RUNNER: &str = "go test";

/// Runner used for debugger runs; test flags follow its `--` separator.
pub const DEFAULT_DEBUG_RUNNER: &str = "dlv test --";

/// Flag selecting the top-level test function.
pub const DEFAULT_SUITE_FLAG: &str = "--test.run";

/// Flag selecting the suite method (testify).
pub const DEFAULT_METHOD_FLAG: &str = "--testify.m";

/// Flag enabling verbose test output.
pub const DEFAULT_VERBOSE_FLAG: &str = "--test.v";

// ============================================================================
// History Defaults
// ============================================================================

/// Application directory name under the platform config/data dirs.
pub const APP_DIR_NAME: &str = "gosel";

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "gosel.toml";

/// User config file name inside the config dir.
pub const USER_CONFIG_FILE: &str = "config.toml";

/// History file name inside the data dir.
pub const DEFAULT_HISTORY_FILE: &str = "history.json";

/// Maximum number of directories remembered in the history file.
pub const DEFAULT_HISTORY_MAX_ENTRIES: usize = 200;
