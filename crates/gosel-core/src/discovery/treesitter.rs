//! Tree-sitter based parsing utilities shared by the declaration parser.

use std::path::Path;

use tree_sitter::{Language, Node, Parser as TSParser, Tree};

use super::error::DiscoveryError;

/// Base tree-sitter parser with shared functionality.
pub struct TreeSitterParser {
    language: Language,
}

impl TreeSitterParser {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Parse source code into a tree-sitter tree.
    ///
    /// A tree containing error or missing nodes is rejected: the file does not
    /// compile, so nothing in it can be trusted as a test declaration.
    pub fn parse_tree(&self, path: &Path, content: &str) -> Result<Tree, DiscoveryError> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| DiscoveryError::Language(e.to_string()))?;

        let tree = parser
            .parse(content, None)
            .ok_or_else(|| DiscoveryError::Syntax {
                path: path.to_path_buf(),
                message: "Failed to parse content".to_string(),
            })?;

        if tree.root_node().has_error() {
            let line = first_error_line(tree.root_node()).unwrap_or(0);
            return Err(DiscoveryError::Syntax {
                path: path.to_path_buf(),
                message: format!("syntax error near line {}", line),
            });
        }

        Ok(tree)
    }

    /// Get text for a node from source content.
    pub fn node_text<'a>(node: &Node, content: &'a str) -> &'a str {
        &content[node.byte_range()]
    }

    /// Get line number (1-based) for a node.
    pub fn node_line(node: &Node) -> u32 {
        node.start_position().row as u32 + 1
    }
}

/// Named children of a node, comments excluded.
pub fn named_children<'a>(node: &Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect()
}

/// First statement of a function body `block`.
///
/// Newer grammars wrap the statements in a `statement_list` node; older ones
/// put them directly under the block.
pub fn first_statement<'a>(block: &Node<'a>) -> Option<Node<'a>> {
    let first = named_children(block).into_iter().next()?;
    if first.kind() == "statement_list" {
        named_children(&first).into_iter().next()
    } else {
        Some(first)
    }
}

/// Line (1-based) of the first error or missing node.
fn first_error_line(node: Node) -> Option<u32> {
    if node.is_error() || node.is_missing() {
        return Some(TreeSitterParser::node_line(&node));
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error() || c.is_missing())
        .find_map(first_error_line)
}
