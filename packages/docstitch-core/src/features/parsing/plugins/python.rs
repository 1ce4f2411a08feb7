//! Python Language Plugin
//!
//! Implements LanguagePlugin for Python source code. Full fidelity: every
//! `def` / `class` at any depth is reported with its body range and its
//! docstring, if it has one.

use tree_sitter::{Language as TSLanguage, Node as TSNode, Point, Tree};

use crate::features::parsing::ports::{
    ExtractionContext, FoundDoc, LanguageId, LanguagePlugin, Scope, SpanExt,
};
use crate::shared::models::{Declaration, DeclarationKind, Fidelity, InlineBody};

/// Python language plugin
pub struct PythonPlugin;

impl PythonPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Extract function definition
    fn extract_function(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let kind = if ctx.in_class() {
            DeclarationKind::Method
        } else {
            DeclarationKind::Function
        };
        self.declare(ctx, node, kind);

        ctx.push_scope(Scope::Function);
        self.extract_body(ctx, node);
        ctx.pop_scope();
    }

    /// Extract class definition
    fn extract_class(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        self.declare(ctx, node, DeclarationKind::Class);

        ctx.push_scope(Scope::Class);
        self.extract_body(ctx, node);
        ctx.pop_scope();
    }

    fn declare(&self, ctx: &mut ExtractionContext, node: &TSNode, kind: DeclarationKind) {
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.node_text(&n).to_string())
            .unwrap_or_default();

        let colon = self.header_colon(node);
        let mut decl =
            Declaration::new(name, kind, node.to_span()).with_header_end(colon.row + 1);
        if let Some(doc) = self.extract_docstring(node, ctx.source) {
            decl = decl.with_existing_doc(doc.text);
            if let Some(span) = doc.span {
                decl = decl.with_doc_span(span);
            }
        }
        if let Some(inline) = self.inline_body(node, colon) {
            decl = decl.with_inline_body(inline);
        }
        ctx.add(decl);
    }

    /// End of the `:` that closes the header
    ///
    /// Signatures may wrap over several lines and trailing comments are
    /// extras, so the colon is located rather than assumed.
    fn header_colon(&self, node: &TSNode) -> Point {
        let body_start = node
            .child_by_field_name("body")
            .map(|b| b.start_byte())
            .unwrap_or(usize::MAX);

        let mut colon = node.start_position();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.start_byte() >= body_start {
                break;
            }
            if child.kind() == ":" {
                colon = child.end_position();
            }
        }
        colon
    }

    /// Body that starts on the header's own line
    ///
    /// An inline docstring is dropped from the kept text, since the new
    /// block takes its place.
    fn inline_body(&self, node: &TSNode, colon: Point) -> Option<InlineBody> {
        let body = node.child_by_field_name("body")?;
        if body.start_position().row != colon.row {
            return None;
        }
        let body_start = match docstring_statement(node) {
            Some(doc) if doc.end_position().row == colon.row => doc.end_position().column,
            _ => body.start_position().column,
        };
        Some(InlineBody {
            header_end: colon.column,
            body_start,
        })
    }

    fn extract_body(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        if let Some(body) = node.child_by_field_name("body") {
            let mut cursor = body.walk();
            for child in body.children(&mut cursor) {
                self.extract_node(ctx, &child);
            }
        }
    }

    /// Extract a single node
    fn extract_node(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        match node.kind() {
            "function_definition" => self.extract_function(ctx, node),
            "class_definition" => self.extract_class(ctx, node),
            _ => {
                // Recurse into children for nested definitions
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.extract_node(ctx, &child);
                }
            }
        }
    }
}

impl Default for PythonPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePlugin for PythonPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_python::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Python
    }

    fn fidelity(&self) -> Fidelity {
        Fidelity::Full
    }

    fn collect_declarations(&self, ctx: &mut ExtractionContext, tree: &Tree) {
        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            self.extract_node(ctx, &child);
        }
    }

    fn extract_docstring(&self, node: &TSNode, source: &str) -> Option<FoundDoc> {
        let statement = docstring_statement(node)?;
        let string_node = statement.named_child(0)?;
        let text = source.get(string_node.byte_range())?;

        // Replaceable only when no code shares its first or last line
        let end_row = statement.end_position().row;
        let own_lines = statement.start_position().row > self.header_colon(node).row
            && !statement
                .next_sibling()
                .is_some_and(|next| next.start_position().row == end_row);

        Some(FoundDoc {
            text: clean_docstring(strip_string_quotes(text)),
            span: own_lines.then(|| statement.to_span()),
        })
    }
}

/// First statement of the body, if it is a bare string
///
/// Comments and blank lines may precede it.
fn docstring_statement<'t>(node: &TSNode<'t>) -> Option<TSNode<'t>> {
    let body = node.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|c| c.kind() != "comment")?;
    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }
    let string_node = first.named_child(0)?;
    (string_node.kind() == "string").then_some(first)
}

/// Strip the prefix letters and quote delimiters of a Python string literal
fn strip_string_quotes(literal: &str) -> &str {
    let body = literal.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = body
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    body
}

/// Normalise docstring indentation the way `inspect.cleandoc` does
///
/// The first line is stripped of leading whitespace; the common indentation
/// of the remaining lines is removed; blank lines at either end are dropped.
pub fn clean_docstring(raw: &str) -> String {
    let expanded = raw.replace('\t', "        ");
    let lines: Vec<&str> = expanded.lines().collect();
    if lines.is_empty() {
        return String::new();
    }

    let margin = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    cleaned.push(lines[0].trim_start());
    for line in &lines[1..] {
        cleaned.push(line.get(margin..).unwrap_or("").trim_end());
    }

    while cleaned.first().map_or(false, |l| l.trim().is_empty()) {
        cleaned.remove(0);
    }
    while cleaned.last().map_or(false, |l| l.trim().is_empty()) {
        cleaned.pop();
    }
    cleaned.join("\n").trim_end().to_string()
}
