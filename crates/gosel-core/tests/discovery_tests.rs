use gosel_core::config::DiscoveryConfig;
use gosel_core::discovery::{DeclarationParser, DiscoveryError, GoTestParser, TestLoader};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const STORE_TEST: &str = r#"package store

import (
	"testing"

	"github.com/stretchr/testify/suite"
)

type StoreSuite struct {
	suite.Suite
}

func TestStore(t *testing.T) {
	suite.Run(t, &StoreSuite{})
}

func (s *StoreSuite) TestPut() {}

func (s *StoreSuite) TestGet() {}

func TestOpen(t *testing.T) {}
"#;

const STORE_EXTRA_TEST: &str = r#"package store

func (s *StoreSuite) TestDelete() {}

func (s *StoreSuite) TestPut() {}
"#;

const CACHE_TEST: &str = r#"package store

import "testing"

type CacheSuite struct{}

func TestCache(t *testing.T) {
	suite.Run(t, &CacheSuite{})
}

func (c *CacheSuite) TestEvict() {}

func TestStore(t *testing.T) {
	suite.Run(t, &StoreSuite{})
}
"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

fn loader() -> TestLoader {
    TestLoader::new(DiscoveryConfig::default())
}

#[test]
fn test_directory_key_set_is_union_of_files() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "store_test.go", STORE_TEST);
    write(temp.path(), "cache_test.go", CACHE_TEST);
    write(temp.path(), "store.go", "package store\n\nfunc TestNotATestFile() {}\n");

    let catalog = loader().load(temp.path(), None).unwrap();
    assert_eq!(catalog.suite_names(), vec!["TestCache", "TestOpen", "TestStore"]);

    let parser = GoTestParser::new();
    let store = parser
        .parse_file(Path::new("store_test.go"), STORE_TEST)
        .unwrap();
    let cache = parser
        .parse_file(Path::new("cache_test.go"), CACHE_TEST)
        .unwrap();
    assert!(catalog.size() >= store.size().max(cache.size()));
}

#[test]
fn test_methods_concatenate_in_file_order() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "cache_test.go", CACHE_TEST);
    write(temp.path(), "store_test.go", STORE_TEST);

    let catalog = loader().load(temp.path(), None).unwrap();
    // cache_test.go sorts first and binds TestStore to StoreSuite, which has
    // no methods in that file.
    assert_eq!(catalog.suite_methods("TestStore"), ["TestPut", "TestGet"]);
    assert_eq!(catalog.suite_methods("TestCache"), ["TestEvict"]);
}

#[test]
fn test_methods_in_files_without_entry_are_dropped() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "store_test.go", STORE_TEST);
    write(temp.path(), "store_extra_test.go", STORE_EXTRA_TEST);

    let catalog = loader().load(temp.path(), None).unwrap();
    assert_eq!(catalog.suite_methods("TestStore"), ["TestPut", "TestGet"]);
}

#[test]
fn test_convention_violation_aborts_load() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "store_test.go", STORE_TEST);
    write(
        temp.path(),
        "zz_test.go",
        "package store\n\nfunc TestBroken(name string) {}\n",
    );

    let err = loader().load(temp.path(), None).unwrap_err();
    match err {
        DiscoveryError::Convention { path, function, .. } => {
            assert!(path.ends_with("zz_test.go"));
            assert!(function.starts_with("TestBroken"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_empty_directory() {
    let temp = TempDir::new().unwrap();
    write(temp.path(), "main.go", "package main\n\nfunc main() {}\n");

    let catalog = loader().load(temp.path(), None).unwrap();
    assert!(catalog.is_empty());
    assert_eq!(catalog.size(), 0);
}
