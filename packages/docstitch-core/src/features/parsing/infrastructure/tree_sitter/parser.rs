//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter runtime is driven; plugins only see the
//! finished `Tree`.

use tree_sitter::{Node, Parser as TSParser, Tree};

use crate::features::parsing::domain::SyntaxError;
use crate::features::parsing::ports::{LanguagePlugin, SpanExt};
use crate::shared::models::{DocstitchError, Result};

/// Longest source excerpt quoted in an "unexpected" message
const SNIPPET_LEN: usize = 24;

/// Tree-sitter based parser for one plugin's grammar
pub struct TreeSitterParser<'p> {
    plugin: &'p dyn LanguagePlugin,
}

impl<'p> TreeSitterParser<'p> {
    pub fn new(plugin: &'p dyn LanguagePlugin) -> Self {
        Self { plugin }
    }

    /// Parse `source`, rejecting trees that contain error or missing nodes
    pub fn parse(&self, source: &str) -> Result<Tree> {
        let language = self.plugin.language_id().name();

        let mut parser = TSParser::new();
        parser
            .set_language(&self.plugin.tree_sitter_language())
            .map_err(|e| {
                DocstitchError::parse(language, 0, 0, format!("grammar unavailable: {}", e))
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| DocstitchError::parse(language, 0, 0, "parser produced no tree"))?;

        if let Some(err) = first_syntax_error(&tree.root_node(), source) {
            return Err(err.into_error(language));
        }
        Ok(tree)
    }
}

/// Depth-first search for the earliest ERROR / MISSING node
pub fn first_syntax_error(node: &Node, source: &str) -> Option<SyntaxError> {
    if !node.has_error() {
        return None;
    }
    if node.is_missing() {
        return Some(SyntaxError::new(
            format!("missing '{}'", node.kind()),
            node.to_span(),
        ));
    }
    if node.is_error() {
        let text = source.get(node.byte_range()).unwrap_or("");
        let snippet: String = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .chars()
            .take(SNIPPET_LEN)
            .collect();
        let message = if snippet.is_empty() {
            "unexpected end of input".to_string()
        } else {
            format!("unexpected '{}'", snippet)
        };
        return Some(SyntaxError::new(message, node.to_span()));
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(err) = first_syntax_error(&child, source) {
            return Some(err);
        }
    }
    None
}
