//! Java Language Plugin
//!
//! Signature-only fidelity: each class and method is reported by its header
//! line; body ends and Javadoc text are not attributed. A `/** */` block
//! leading the body is still located so a rerun replaces it.

use tree_sitter::{Language as TSLanguage, Node as TSNode, Tree};

use crate::features::parsing::ports::{
    body_open_line, leading_doc_comment, ExtractionContext, LanguageId, LanguagePlugin, Scope,
    SpanExt,
};
use crate::shared::models::{Declaration, DeclarationKind, Fidelity};

/// Java language plugin
pub struct JavaPlugin;

impl JavaPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Extract class-like declaration (class, interface, enum, record)
    fn extract_class(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        self.declare(ctx, node, DeclarationKind::Class);

        ctx.push_scope(Scope::Class);
        self.extract_body(ctx, node);
        ctx.pop_scope();
    }

    /// Extract method or constructor
    fn extract_method(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        // Abstract and interface methods have no body to hold a block
        if node.child_by_field_name("body").is_none() {
            return;
        }
        self.declare(ctx, node, DeclarationKind::Method);

        ctx.push_scope(Scope::Function);
        self.extract_body(ctx, node);
        ctx.pop_scope();
    }

    fn declare(&self, ctx: &mut ExtractionContext, node: &TSNode, kind: DeclarationKind) {
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.node_text(&n).to_string())
            .unwrap_or_default();
        let header_end = body_open_line(node).unwrap_or(node.start_position().row + 1);

        let decl = Declaration::new(name, kind, node.to_span())
            .with_header_end(header_end)
            .signature_only();
        let decl = self.locate_block(ctx.source, node, kind, decl);
        ctx.add(decl);
    }

    /// Attach the span of a `/** */` block already leading the body
    fn locate_block(
        &self,
        source: &str,
        node: &TSNode,
        kind: DeclarationKind,
        decl: Declaration,
    ) -> Declaration {
        let comment = node.child_by_field_name("body").and_then(|body| {
            leading_doc_comment(&body, source, kind == DeclarationKind::Class)
        });
        match comment {
            Some(comment) => decl.with_doc_span(comment.to_span()),
            None => decl,
        }
    }

    /// Extract body (class/interface body or method block)
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
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration" => self.extract_class(ctx, node),
            "method_declaration" | "constructor_declaration" => self.extract_method(ctx, node),
            _ => {
                // Recurse for nested declarations (anonymous classes, enum bodies)
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.extract_node(ctx, &child);
                }
            }
        }
    }
}

impl Default for JavaPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePlugin for JavaPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_java::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Java
    }

    fn fidelity(&self) -> Fidelity {
        Fidelity::SignatureOnly
    }

    fn collect_declarations(&self, ctx: &mut ExtractionContext, tree: &Tree) {
        let root = tree.root_node();
        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            self.extract_node(ctx, &child);
        }
    }
}
