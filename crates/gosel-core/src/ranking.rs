//! History based ordering of selection candidates.

use tracing::debug;

use crate::discovery::TestCatalog;
use crate::history::HistoryEntry;

/// One test root in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedSuite {
    pub name: String,
    pub methods: Vec<String>,
}

/// Selection candidates in presentation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedTests {
    suites: Vec<RankedSuite>,
}

impl RankedTests {
    pub fn suites(&self) -> &[RankedSuite] {
        &self.suites
    }

    pub fn suite_names(&self) -> Vec<String> {
        self.suites.iter().map(|s| s.name.clone()).collect()
    }

    /// Methods of a suite in presentation order.
    pub fn suite_methods(&self, name: &str) -> &[String] {
        self.suites
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.methods.as_slice())
            .unwrap_or(&[])
    }

    /// Number of selectable units.
    pub fn size(&self) -> usize {
        self.suites.iter().map(|s| s.methods.len().max(1)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    /// `suite.method` for every method, bare `suite` for roots without methods.
    pub fn flatten(&self) -> Vec<String> {
        let mut list = Vec::with_capacity(self.size());
        for suite in &self.suites {
            if suite.methods.is_empty() {
                list.push(suite.name.clone());
            } else {
                list.extend(
                    suite
                        .methods
                        .iter()
                        .map(|method| format!("{}.{}", suite.name, method)),
                );
            }
        }
        list
    }
}

/// Order `catalog` so the last selection comes first.
///
/// The remembered suite moves to the front and, inside it, the remembered
/// method. Everything else keeps its sorted relative order. Without a
/// matching entry the result is the catalogue order.
pub fn rank(catalog: &TestCatalog, last: Option<&HistoryEntry>) -> RankedTests {
    let mut suites: Vec<RankedSuite> = catalog
        .iter()
        .map(|(name, methods)| RankedSuite {
            name: name.to_string(),
            methods: methods.to_vec(),
        })
        .collect();

    let Some(last) = last else {
        return RankedTests { suites };
    };

    let Some(position) = suites.iter().position(|s| s.name == last.suite) else {
        debug!(suite = %last.suite, "remembered suite no longer present");
        return RankedTests { suites };
    };

    let mut remembered = suites.remove(position);
    if !last.method.is_empty() {
        promote(&mut remembered.methods, |m| *m == last.method);
    }
    suites.insert(0, remembered);

    debug!(suite = %last.suite, method = %last.method, "promoted last selection");
    RankedTests { suites }
}

/// Stable partition: matching items first, both halves in original order.
fn promote<T>(items: &mut Vec<T>, is_match: impl Fn(&T) -> bool) {
    let (mut front, back): (Vec<T>, Vec<T>) = items.drain(..).partition(|item| is_match(item));
    front.extend(back);
    *items = front;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TestCatalog {
        let mut c = TestCatalog::new();
        c.insert("TestAlpha", vec![]);
        c.insert(
            "TestStore",
            vec!["TestPut".into(), "TestGet".into(), "TestDelete".into()],
        );
        c.insert("TestZeta", vec![]);
        c.insert("TestBeta", vec![]);
        c
    }

    fn names(ranked: &RankedTests) -> Vec<String> {
        ranked.suite_names()
    }

    #[test]
    fn test_no_history_is_sorted_order() {
        let c = catalog();
        let ranked = rank(&c, None);
        let expected: Vec<String> = c.suite_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(names(&ranked), expected);
        assert_eq!(ranked.size(), c.size());
    }

    #[test]
    fn test_remembered_suite_first_rest_stable() {
        let c = catalog();
        let entry = HistoryEntry::new("/repo", "TestZeta", "");
        let ranked = rank(&c, Some(&entry));
        assert_eq!(
            names(&ranked),
            vec!["TestZeta", "TestAlpha", "TestBeta", "TestStore"]
        );
    }

    #[test]
    fn test_remembered_method_first() {
        let c = catalog();
        let entry = HistoryEntry::new("/repo", "TestStore", "TestDelete");
        let ranked = rank(&c, Some(&entry));
        assert_eq!(ranked.suites()[0].name, "TestStore");
        assert_eq!(
            ranked.suite_methods("TestStore"),
            ["TestDelete", "TestPut", "TestGet"]
        );
    }

    #[test]
    fn test_duplicate_methods_all_promoted() {
        let mut c = TestCatalog::new();
        c.insert("TestS", vec!["TestA".into(), "TestB".into(), "TestA".into()]);
        let entry = HistoryEntry::new("/repo", "TestS", "TestA");
        let ranked = rank(&c, Some(&entry));
        assert_eq!(ranked.suite_methods("TestS"), ["TestA", "TestA", "TestB"]);
    }

    #[test]
    fn test_unknown_suite_is_passthrough() {
        let c = catalog();
        let entry = HistoryEntry::new("/repo", "TestGone", "TestX");
        assert_eq!(rank(&c, Some(&entry)), rank(&c, None));
    }

    #[test]
    fn test_flatten() {
        let c = catalog();
        let entry = HistoryEntry::new("/repo", "TestStore", "TestGet");
        let flat = rank(&c, Some(&entry)).flatten();
        assert_eq!(
            flat,
            vec![
                "TestStore.TestGet",
                "TestStore.TestPut",
                "TestStore.TestDelete",
                "TestAlpha",
                "TestBeta",
                "TestZeta",
            ]
        );
    }
}
