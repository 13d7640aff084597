//! Test discovery for Go test files.
//!
//! Turns a directory of `_test.go` files into a [`TestCatalog`]: flat tests
//! map to no methods, testify-style suite entries map to the prefixed methods
//! of their carrier type.
//!
//! ## Components
//!
//! - `DeclarationParser` trait - Per-file extraction seam
//! - `GoTestParser` - tree-sitter-go implementation
//! - `TestLoader` - Scans a directory and merges per-file catalogues
//! - `TestCatalog` - Sorted, mergeable test model

mod error;
mod go;
mod loader;
mod model;
mod traits;
mod treesitter;

pub use error::DiscoveryError;
pub use go::{try_extract_carrier, GoTestParser};
pub use loader::TestLoader;
pub use model::{MethodDeclaration, TestCatalog, TestDeclaration, TestKind};
pub use traits::DeclarationParser;
