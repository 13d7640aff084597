//! Go test declaration parser using tree-sitter.
//!
//! Recognizes two shapes of test roots:
//!
//! ```go
//! func TestPlain(t *testing.T) { ... }          // flat test
//!
//! func TestStore(t *testing.T) {                // suite entry, carrier StoreSuite
//!     suite.Run(t, &StoreSuite{})
//! }
//! func (s *StoreSuite) TestPut() { ... }        // suite method
//! ```

use std::path::Path;

use tracing::{debug, trace};
use tree_sitter::Node;

use super::error::DiscoveryError;
use super::model::{MethodDeclaration, TestCatalog, TestDeclaration};
use super::traits::DeclarationParser;
use super::treesitter::{first_statement, named_children, TreeSitterParser};
use crate::config::DiscoveryConfig;

/// Go test parser using tree-sitter.
pub struct GoTestParser {
    base: TreeSitterParser,
    config: DiscoveryConfig,
}

impl GoTestParser {
    pub fn new() -> Self {
        Self::with_config(DiscoveryConfig::default())
    }

    pub fn with_config(config: DiscoveryConfig) -> Self {
        Self {
            base: TreeSitterParser::new(tree_sitter_go::LANGUAGE.into()),
            config,
        }
    }

    /// Collect test roots and suite methods in declaration order.
    pub fn declarations(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<(Vec<TestDeclaration>, Vec<MethodDeclaration>), DiscoveryError> {
        let tree = self.base.parse_tree(path, content)?;
        let root = tree.root_node();

        let mut tests = Vec::new();
        let mut methods = Vec::new();

        for node in named_children(&root) {
            match node.kind() {
                "function_declaration" => {
                    if let Some(test) = self.extract_test_root(&node, content, path)? {
                        tests.push(test);
                    }
                }
                "method_declaration" => {
                    if let Some(method) = self.extract_method(&node, content) {
                        trace!(carrier = %method.carrier, method = %method.name, "suite method");
                        methods.push(method);
                    }
                }
                _ => {}
            }
        }

        Ok((tests, methods))
    }

    fn extract_test_root(
        &self,
        node: &Node,
        content: &str,
        path: &Path,
    ) -> Result<Option<TestDeclaration>, DiscoveryError> {
        let Some(name_node) = node.child_by_field_name("name") else {
            return Ok(None);
        };
        let name = TreeSitterParser::node_text(&name_node, content);

        if !name.starts_with(&self.config.test_prefix) {
            trace!(function = name, "not a test root");
            return Ok(None);
        }
        if self.config.ignored_functions.iter().any(|f| f == name) {
            debug!(function = name, "ignored test root");
            return Ok(None);
        }

        self.check_signature(node, content).map_err(|reason| DiscoveryError::Convention {
            path: path.to_path_buf(),
            function: format!("{} (line {})", name, TreeSitterParser::node_line(node)),
            reason,
        })?;

        let test = match try_extract_carrier(node, content) {
            Some(carrier) => {
                debug!(test = name, %carrier, "suite entry");
                TestDeclaration::suite(name, carrier)
            }
            None => {
                debug!(test = name, "flat test");
                TestDeclaration::flat(name)
            }
        };
        Ok(Some(test))
    }

    /// The sole parameter must be `*<context_package>.<context_type>`.
    fn check_signature(&self, node: &Node, content: &str) -> Result<(), String> {
        let expected = format!(
            "*{}.{}",
            self.config.context_package, self.config.context_type
        );

        let params = node
            .child_by_field_name("parameters")
            .map(|p| named_children(&p))
            .unwrap_or_default();

        let [param] = params.as_slice() else {
            return Err(format!(
                "expected a single parameter of type {}, found {}",
                expected,
                params.len()
            ));
        };
        if param.kind() != "parameter_declaration" {
            return Err(format!("expected a single parameter of type {}", expected));
        }

        let mut cursor = param.walk();
        if param.children_by_field_name("name", &mut cursor).count() > 1 {
            return Err(format!("expected a single parameter of type {}", expected));
        }

        let type_node = param
            .child_by_field_name("type")
            .ok_or_else(|| format!("parameter has no type, expected {}", expected))?;

        if self.is_context_pointer(&type_node, content) {
            Ok(())
        } else {
            Err(format!(
                "parameter must be {}, found {}",
                expected,
                TreeSitterParser::node_text(&type_node, content)
            ))
        }
    }

    fn is_context_pointer(&self, type_node: &Node, content: &str) -> bool {
        if type_node.kind() != "pointer_type" {
            return false;
        }
        let Some(inner) = named_children(type_node).into_iter().next() else {
            return false;
        };
        if inner.kind() != "qualified_type" {
            return false;
        }
        let package = inner
            .child_by_field_name("package")
            .map(|n| TreeSitterParser::node_text(&n, content));
        let name = inner
            .child_by_field_name("name")
            .map(|n| TreeSitterParser::node_text(&n, content));

        package == Some(self.config.context_package.as_str())
            && name == Some(self.config.context_type.as_str())
    }

    /// A prefixed method whose receiver is a pointer to a named type.
    fn extract_method(&self, node: &Node, content: &str) -> Option<MethodDeclaration> {
        let name_node = node.child_by_field_name("name")?;
        let name = TreeSitterParser::node_text(&name_node, content);
        if !name.starts_with(&self.config.test_prefix) {
            return None;
        }

        let receiver = node.child_by_field_name("receiver")?;
        let param = named_children(&receiver).into_iter().next()?;
        let pointer = param.child_by_field_name("type")?;
        if pointer.kind() != "pointer_type" {
            return None;
        }
        let carrier = named_children(&pointer).into_iter().next()?;
        if carrier.kind() != "type_identifier" {
            return None;
        }

        Some(MethodDeclaration {
            carrier: TreeSitterParser::node_text(&carrier, content).to_string(),
            name: name.to_string(),
        })
    }
}

/// Carrier type of a suite bootstrap, if the function is one.
///
/// Matches a body whose first statement is a call whose second argument is
/// `&T{...}` with `T` a plain type name. Any other shape is `None`.
pub fn try_extract_carrier(function: &Node, content: &str) -> Option<String> {
    let body = function.child_by_field_name("body")?;
    let statement = first_statement(&body)?;
    if statement.kind() != "expression_statement" {
        return None;
    }

    let call = named_children(&statement).into_iter().next()?;
    if call.kind() != "call_expression" {
        return None;
    }

    let arguments = named_children(&call.child_by_field_name("arguments")?);
    let argument = arguments.get(1)?;
    if argument.kind() != "unary_expression" {
        return None;
    }
    let operator = argument.child_by_field_name("operator")?;
    if TreeSitterParser::node_text(&operator, content) != "&" {
        return None;
    }

    let literal = argument.child_by_field_name("operand")?;
    if literal.kind() != "composite_literal" {
        return None;
    }
    let literal_type = literal.child_by_field_name("type")?;
    if literal_type.kind() != "type_identifier" {
        return None;
    }

    Some(TreeSitterParser::node_text(&literal_type, content).to_string())
}

impl Default for GoTestParser {
    fn default() -> Self {
        Self::new()
    }
}

impl DeclarationParser for GoTestParser {
    fn parse_file(&self, path: &Path, content: &str) -> Result<TestCatalog, DiscoveryError> {
        let (tests, methods) = self.declarations(path, content)?;
        let catalog = TestCatalog::resolve(&tests, &methods);
        debug!(
            path = %path.display(),
            roots = catalog.len(),
            size = catalog.size(),
            "parsed test file"
        );
        Ok(catalog)
    }

    fn test_file_suffix(&self) -> &str {
        &self.config.test_file_suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUITE_FILE: &str = r#"package store

import (
	"testing"

	"github.com/stretchr/testify/suite"
)

type StoreSuite struct {
	suite.Suite
	db *DB
}

func TestStore(t *testing.T) {
	suite.Run(t, &StoreSuite{})
}

func (s *StoreSuite) SetupTest() {
	s.db = Open()
}

func (s *StoreSuite) TestPut() {}

func (s *StoreSuite) TestGet() {}

func (s StoreSuite) TestByValue() {}

func (s *StoreSuite) helper() {}

func TestPlain(t *testing.T) {
	if 1+1 != 2 {
		t.Fatal("math")
	}
}

func newFixture() *StoreSuite {
	return &StoreSuite{}
}
"#;

    fn parse(content: &str) -> Result<TestCatalog, DiscoveryError> {
        GoTestParser::new().parse_file(Path::new("store_test.go"), content)
    }

    #[test]
    fn test_suite_and_flat_tests() {
        let catalog = parse(SUITE_FILE).unwrap();
        assert_eq!(catalog.suite_names(), vec!["TestPlain", "TestStore"]);
        assert_eq!(catalog.suite_methods("TestStore"), ["TestPut", "TestGet"]);
        assert!(catalog.suite_methods("TestPlain").is_empty());
        assert_eq!(catalog.size(), 3);
    }

    #[test]
    fn test_declarations_keep_source_order() {
        let parser = GoTestParser::new();
        let (tests, methods) = parser
            .declarations(Path::new("store_test.go"), SUITE_FILE)
            .unwrap();
        assert_eq!(
            tests,
            vec![
                TestDeclaration::suite("TestStore", "StoreSuite"),
                TestDeclaration::flat("TestPlain"),
            ]
        );
        let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["TestPut", "TestGet"]);
    }

    #[test]
    fn test_suite_without_methods() {
        let src = r#"package p

import "testing"

type EmptySuite struct{}

func TestEmpty(t *testing.T) {
	suite.Run(t, &EmptySuite{})
}
"#;
        let catalog = parse(src).unwrap();
        assert_eq!(catalog.suite_names(), vec!["TestEmpty"]);
        assert!(catalog.suite_methods("TestEmpty").is_empty());
        assert_eq!(catalog.size(), 1);
    }

    #[test]
    fn test_non_matching_bootstrap_is_flat() {
        let src = r#"package p

import "testing"

func TestNew(t *testing.T) {
	suite.Run(t, new(MySuite))
}

func TestOneArg(t *testing.T) {
	run(&MySuite{})
}

func TestQualified(t *testing.T) {
	suite.Run(t, &other.Suite{})
}

func TestAssign(t *testing.T) {
	s := &MySuite{}
	suite.Run(t, s)
}

func TestEmptyBody(t *testing.T) {}

func (s *MySuite) TestCase() {}
"#;
        let parser = GoTestParser::new();
        let (tests, _) = parser.declarations(Path::new("p_test.go"), src).unwrap();
        assert!(tests.iter().all(|t| t.carrier().is_none()));

        let catalog = parse(src).unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.size(), 5);
    }

    #[test]
    fn test_wrong_parameter_type_is_fatal() {
        let src = r#"package p

import "testing"

func TestBench(b *testing.B) {}
"#;
        let err = parse(src).unwrap_err();
        assert!(matches!(err, DiscoveryError::Convention { ref function, .. } if function.starts_with("TestBench")));
        assert!(err.is_structural());
    }

    #[test]
    fn test_extra_parameter_is_fatal() {
        let src = r#"package p

import "testing"

func TestTwo(t *testing.T, n int) {}
"#;
        assert!(matches!(
            parse(src),
            Err(DiscoveryError::Convention { .. })
        ));
    }

    #[test]
    fn test_helpers_and_test_main_are_skipped() {
        let src = r#"package p

import (
	"os"
	"testing"
)

func TestMain(m *testing.M) {
	os.Exit(m.Run())
}

func helper(t *testing.T, n int) {}

func TestReal(t *testing.T) {}
"#;
        let catalog = parse(src).unwrap();
        assert_eq!(catalog.suite_names(), vec!["TestReal"]);
    }

    #[test]
    fn test_leading_comment_in_body() {
        let src = r#"package p

import "testing"

func TestCommented(t *testing.T) {
	// bootstrap the suite
	suite.Run(t, &CommentedSuite{})
}

func (s *CommentedSuite) TestA() {}
"#;
        let catalog = parse(src).unwrap();
        assert_eq!(catalog.suite_methods("TestCommented"), ["TestA"]);
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let src = "package p\n\nfunc TestBroken(t *testing.T) {\n";
        assert!(matches!(parse(src), Err(DiscoveryError::Syntax { .. })));
    }

    #[test]
    fn test_custom_prefix() {
        let config = DiscoveryConfig {
            test_prefix: "Spec".to_string(),
            ..DiscoveryConfig::default()
        };
        let src = r#"package p

import "testing"

func SpecLogin(t *testing.T) {}

func TestIgnoredHere(x int) {}
"#;
        let catalog = GoTestParser::with_config(config)
            .parse_file(Path::new("p_test.go"), src)
            .unwrap();
        assert_eq!(catalog.suite_names(), vec!["SpecLogin"]);
    }

    #[test]
    fn test_can_parse() {
        let parser = GoTestParser::new();
        assert!(parser.can_parse("store_test.go"));
        assert!(!parser.can_parse("store.go"));
        assert!(!parser.can_parse("store_test.go.orig"));
    }
}
