//! Language Plugin Port
//!
//! Defines the contract for language-specific grammar adapters.
//! Each supported language implements this trait; the extractor only ever
//! talks to `dyn LanguagePlugin`.

use std::collections::HashMap;
use tree_sitter::{Language as TSLanguage, Node as TSNode, Tree};

use crate::features::patching::DocStyle;
use crate::shared::models::{Declaration, Fidelity, Span};

/// Language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageId {
    Python,
    JavaScript,
    TypeScript,
    Java,
    Cpp,
}

impl LanguageId {
    /// Every supported language, primary language first
    pub const ALL: [LanguageId; 5] = [
        LanguageId::Python,
        LanguageId::JavaScript,
        LanguageId::TypeScript,
        LanguageId::Java,
        LanguageId::Cpp,
    ];

    /// Get language name as string
    pub fn name(&self) -> &'static str {
        match self {
            LanguageId::Python => "python",
            LanguageId::JavaScript => "javascript",
            LanguageId::TypeScript => "typescript",
            LanguageId::Java => "java",
            LanguageId::Cpp => "cpp",
        }
    }

    /// Resolve a user-supplied language tag (case-insensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "python" | "py" => Some(LanguageId::Python),
            "javascript" | "js" => Some(LanguageId::JavaScript),
            "typescript" | "ts" => Some(LanguageId::TypeScript),
            "java" => Some(LanguageId::Java),
            "c" | "c++" | "cpp" => Some(LanguageId::Cpp),
            _ => None,
        }
    }

    /// Get language from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyi" => Some(LanguageId::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(LanguageId::JavaScript),
            "ts" | "tsx" => Some(LanguageId::TypeScript),
            "java" => Some(LanguageId::Java),
            "c" | "h" | "cc" | "cpp" | "cxx" | "hpp" | "hh" => Some(LanguageId::Cpp),
            _ => None,
        }
    }

    /// Documentation block convention used when patching this language
    pub fn doc_style(&self) -> DocStyle {
        match self {
            LanguageId::Python => DocStyle::TripleQuote,
            _ => DocStyle::BlockComment,
        }
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Enclosing construct while walking the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Class,
    Function,
}

/// Extraction context passed to plugins
pub struct ExtractionContext<'a> {
    /// Source code
    pub source: &'a str,
    /// Enclosing constructs, innermost last
    pub scope_stack: Vec<Scope>,
    /// Declarations in discovery (pre-order) order
    pub declarations: Vec<Declaration>,
}

impl<'a> ExtractionContext<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            scope_stack: Vec::new(),
            declarations: Vec::new(),
        }
    }

    pub fn push_scope(&mut self, scope: Scope) {
        self.scope_stack.push(scope);
    }

    pub fn pop_scope(&mut self) {
        self.scope_stack.pop();
    }

    /// True when the innermost enclosing construct is a class body
    pub fn in_class(&self) -> bool {
        self.scope_stack.last() == Some(&Scope::Class)
    }

    pub fn add(&mut self, decl: Declaration) {
        self.declarations.push(decl);
    }

    /// Get node text from tree-sitter node
    pub fn node_text(&self, node: &TSNode) -> &str {
        self.source.get(node.byte_range()).unwrap_or("")
    }
}

/// Documentation found in the source for one declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundDoc {
    pub text: String,
    /// Lines the block occupies, when it has them to itself
    pub span: Option<Span>,
}

/// Language Plugin trait
///
/// Each supported language implements this trait to provide:
/// - Tree-sitter grammar
/// - Extraction fidelity
/// - Declaration walking and (optionally) existing-doc lookup
pub trait LanguagePlugin: Send + Sync {
    /// Get the tree-sitter language
    fn tree_sitter_language(&self) -> TSLanguage;

    /// Get the language identifier
    fn language_id(&self) -> LanguageId;

    /// How precisely this adapter locates declarations
    fn fidelity(&self) -> Fidelity;

    /// Documentation block convention for this language
    fn doc_style(&self) -> DocStyle {
        self.language_id().doc_style()
    }

    /// Walk the parsed tree and push every declaration into `ctx`
    fn collect_declarations(&self, ctx: &mut ExtractionContext, tree: &Tree);

    /// Get docstring attached to a declaration node (language-specific)
    fn extract_docstring(&self, _node: &TSNode, _source: &str) -> Option<FoundDoc> {
        None
    }
}

/// Registry for language plugins
pub struct LanguageRegistry {
    plugins: HashMap<LanguageId, Box<dyn LanguagePlugin>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Register a language plugin
    pub fn register(&mut self, plugin: Box<dyn LanguagePlugin>) {
        self.plugins.insert(plugin.language_id(), plugin);
    }

    /// Get plugin by language ID
    pub fn get(&self, lang: LanguageId) -> Option<&dyn LanguagePlugin> {
        self.plugins.get(&lang).map(|p| p.as_ref())
    }

    /// Get plugin by user-supplied tag
    pub fn get_by_tag(&self, tag: &str) -> Option<&dyn LanguagePlugin> {
        self.get(LanguageId::from_tag(tag)?)
    }

    /// Get all registered plugins
    pub fn all(&self) -> impl Iterator<Item = &dyn LanguagePlugin> {
        self.plugins.values().map(|p| p.as_ref())
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper trait for extracting spans from tree-sitter nodes
pub trait SpanExt {
    fn to_span(&self) -> Span;
}

impl SpanExt for TSNode<'_> {
    fn to_span(&self) -> Span {
        let start = self.start_position();
        let end = self.end_position();
        // A node ending at column 0 stops before that row's first byte
        let end_row = if end.column == 0 && end.row > start.row {
            end.row - 1
        } else {
            end.row
        };
        Span::new(start.row + 1, start.column, end_row + 1, end.column)
    }
}

/// 1-based line on which a brace-delimited body opens, if the node has one
pub fn body_open_line(node: &TSNode) -> Option<usize> {
    node.child_by_field_name("body")
        .map(|body| body.start_position().row + 1)
}

/// Leading `/** */` comment of a brace body, if it documents the body's owner
///
/// The comment has to start below the `{` line and end before any other
/// code on its last line. In a class body, a comment sitting directly on
/// top of a member is that member's doc; only a blank line, another
/// comment or the end of the body after it leaves it to the class.
pub fn leading_doc_comment<'t>(
    body: &TSNode<'t>,
    source: &str,
    class_body: bool,
) -> Option<TSNode<'t>> {
    let first = body.named_child(0)?;
    if !is_comment(&first) {
        return None;
    }
    clean_block_comment(source.get(first.byte_range())?)?;
    if first.start_position().row <= body.start_position().row {
        return None;
    }

    let end_row = first.end_position().row;
    if first
        .next_sibling()
        .is_some_and(|next| next.start_position().row == end_row)
    {
        return None;
    }
    if class_body {
        if let Some(next) = first.next_named_sibling() {
            if !is_comment(&next) && next.start_position().row <= end_row + 1 {
                return None;
            }
        }
    }
    Some(first)
}

fn is_comment(node: &TSNode) -> bool {
    matches!(node.kind(), "comment" | "block_comment" | "line_comment")
}

/// Clean a `/** ... */` comment into plain text
pub fn clean_block_comment(text: &str) -> Option<String> {
    if !text.starts_with("/**") || text.starts_with("/**/") {
        return None;
    }
    let doc = text
        .trim_start_matches("/**")
        .trim_end_matches("*/")
        .lines()
        .map(|l| l.trim().trim_start_matches('*').trim())
        .collect::<Vec<_>>()
        .join("\n");
    Some(doc.trim().to_string())
}
