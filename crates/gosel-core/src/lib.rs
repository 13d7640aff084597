pub mod command;
pub mod config;
pub mod discovery;
pub mod history;
pub mod logging;
pub mod ranking;
pub mod selection;
pub mod session;

pub use command::{CommandSynthesizer, RunMode};
pub use config::{Config, ConfigError, HistoryConfig, SelectorConfig};
pub use discovery::{DiscoveryError, GoTestParser, TestCatalog, TestLoader};
pub use history::{FileHistory, HistoryEntry, HistoryError, HistoryStore, MemoryHistory};
pub use ranking::{rank, RankedSuite, RankedTests};
pub use selection::{FuzzyWidget, PickRequest, SelectError, Selection, Selector};
pub use session::{CommandExecutor, SessionError, SessionOutcome, Target, TestSession};
