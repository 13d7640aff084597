//! Configuration management for gosel.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `gosel.toml` file
//! 3. User config `~/.config/gosel/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Test file discovery and declaration matching.
    pub discovery: DiscoveryConfig,

    /// Interactive selection policy.
    pub selector: SelectorConfig,

    /// Synthesized command shape.
    pub command: CommandConfig,

    /// Selection history persistence.
    pub history: HistoryConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./gosel.toml` (project local)
    /// 2. `~/.config/gosel/config.toml` (user config)
    /// 3. Falls back to defaults
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(PROJECT_CONFIG_FILE).exists() {
            return Self::from_file(PROJECT_CONFIG_FILE);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join(APP_DIR_NAME).join(USER_CONFIG_FILE);
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(file) = std::env::var("GOSEL_HISTORY_FILE") {
            self.history.file = Some(PathBuf::from(file));
        }
        if let Ok(threshold) = std::env::var("GOSEL_FLATTEN_THRESHOLD") {
            if let Ok(n) = threshold.parse() {
                self.selector.flatten_threshold = n;
            }
        }
        if let Ok(size) = std::env::var("GOSEL_PAGE_SIZE") {
            if let Ok(n) = size.parse() {
                self.selector.page_size = n;
            }
        }
        if let Ok(runner) = std::env::var("GOSEL_RUNNER") {
            self.command.runner = runner;
        }
        if let Ok(runner) = std::env::var("GOSEL_DEBUG_RUNNER") {
            self.command.debug_runner = runner;
        }
    }

    /// Reject values the pipeline cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discovery.test_file_suffix.is_empty() {
            return Err(ConfigError::Invalid(
                "discovery.test_file_suffix must not be empty".to_string(),
            ));
        }
        if self.discovery.test_prefix.is_empty() {
            return Err(ConfigError::Invalid(
                "discovery.test_prefix must not be empty".to_string(),
            ));
        }
        if self.selector.page_size == 0 {
            return Err(ConfigError::Invalid(
                "selector.page_size must be at least 1".to_string(),
            ));
        }
        if self.command.runner.trim().is_empty() || self.command.debug_runner.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "command.runner and command.debug_runner must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Test file discovery and declaration matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// File name suffix of test files.
    pub test_file_suffix: String,

    /// Name prefix of test roots and suite methods.
    pub test_prefix: String,

    /// Package qualifier of the test context type.
    pub context_package: String,

    /// Name of the test context type.
    pub context_type: String,

    /// Prefixed top-level functions that are skipped entirely.
    pub ignored_functions: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            test_file_suffix: DEFAULT_TEST_FILE_SUFFIX.to_string(),
            test_prefix: DEFAULT_TEST_PREFIX.to_string(),
            context_package: DEFAULT_CONTEXT_PACKAGE.to_string(),
            context_type: DEFAULT_CONTEXT_TYPE.to_string(),
            ignored_functions: DEFAULT_IGNORED_FUNCTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Interactive selection policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Catalogues larger than this are selected suite first, method second.
    pub flatten_threshold: usize,

    /// Visible rows in the fuzzy widget.
    pub page_size: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            flatten_threshold: DEFAULT_FLATTEN_THRESHOLD,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Synthesized command shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandConfig {
    /// Runner for plain runs.
    pub runner: String,

    /// Runner for debugger runs.
    pub debug_runner: String,

    /// Flag that filters the top-level test.
    pub suite_flag: String,

    /// Flag that filters the suite method.
    pub method_flag: String,

    /// Flag that enables verbose output.
    pub verbose_flag: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            runner: DEFAULT_RUNNER.to_string(),
            debug_runner: DEFAULT_DEBUG_RUNNER.to_string(),
            suite_flag: DEFAULT_SUITE_FLAG.to_string(),
            method_flag: DEFAULT_METHOD_FLAG.to_string(),
            verbose_flag: DEFAULT_VERBOSE_FLAG.to_string(),
        }
    }
}

/// Selection history persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// History file; defaults to the platform data dir.
    pub file: Option<PathBuf>,

    /// Maximum number of remembered directories.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            file: None,
            max_entries: DEFAULT_HISTORY_MAX_ENTRIES,
        }
    }
}

impl HistoryConfig {
    /// Resolve the history file path, falling back to `<data_dir>/gosel/history.json`.
    pub fn file_or_default(&self) -> PathBuf {
        self.file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
                .join(DEFAULT_HISTORY_FILE)
        })
    }
}
