//! Test catalogue types.

use std::collections::BTreeMap;

/// How a test root is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestKind {
    /// Runs directly, no member methods.
    Flat,
    /// Bootstraps a suite whose methods live on `carrier`.
    SuiteEntry { carrier: String },
}

/// A test root discovered in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDeclaration {
    pub name: String,
    pub kind: TestKind,
}

impl TestDeclaration {
    pub fn flat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TestKind::Flat,
        }
    }

    pub fn suite(name: impl Into<String>, carrier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TestKind::SuiteEntry {
                carrier: carrier.into(),
            },
        }
    }

    /// Carrier type for suite entries.
    pub fn carrier(&self) -> Option<&str> {
        match &self.kind {
            TestKind::Flat => None,
            TestKind::SuiteEntry { carrier } => Some(carrier),
        }
    }
}

/// A prefixed method bound to a carrier type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDeclaration {
    pub carrier: String,
    pub name: String,
}

/// Mapping of test root name to its ordered suite methods.
///
/// Used both for a single file and for a whole directory. An empty method
/// list means the root is a flat test (or a suite without methods); either
/// way it is one selectable unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestCatalog {
    tests: BTreeMap<String, Vec<String>>,
}

impl TestCatalog {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve one file's declarations into a catalogue.
    ///
    /// Flat roots map to no methods; suite roots map to the methods of their
    /// carrier in declaration order.
    pub fn resolve(tests: &[TestDeclaration], methods: &[MethodDeclaration]) -> Self {
        let mut catalog = Self::new();
        for test in tests {
            let members = match test.carrier() {
                None => Vec::new(),
                Some(carrier) => methods
                    .iter()
                    .filter(|m| m.carrier == carrier)
                    .map(|m| m.name.clone())
                    .collect(),
            };
            catalog.tests.insert(test.name.clone(), members);
        }
        catalog
    }

    /// Insert or replace one test root.
    pub fn insert(&mut self, name: impl Into<String>, methods: Vec<String>) {
        self.tests.insert(name.into(), methods);
    }

    /// Merge two catalogues, `self` first.
    ///
    /// Shared keys concatenate their method lists without deduplication, so
    /// merging the same file twice doubles its methods.
    pub fn merge(mut self, other: TestCatalog) -> TestCatalog {
        for (name, methods) in other.tests {
            self.tests.entry(name).or_default().extend(methods);
        }
        self
    }

    /// Test root names in lexicographic order.
    pub fn suite_names(&self) -> Vec<&str> {
        self.tests.keys().map(String::as_str).collect()
    }

    /// Methods of a test root, empty when unknown or flat.
    pub fn suite_methods(&self, name: &str) -> &[String] {
        self.tests.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tests.contains_key(name)
    }

    /// Iterate `(name, methods)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.tests
            .iter()
            .map(|(name, methods)| (name.as_str(), methods.as_slice()))
    }

    /// Number of test roots.
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Number of selectable units: each method, or one for a root without methods.
    pub fn size(&self) -> usize {
        self.tests.values().map(|methods| methods.len().max(1)).sum()
    }
}
