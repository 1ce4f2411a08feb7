//! C/C++ Language Plugin
//!
//! Signature-only fidelity over the C++ grammar, which also accepts the C
//! subset. Reports function definitions and class/struct definitions;
//! prototypes without a body are skipped.

use tree_sitter::{Language as TSLanguage, Node as TSNode, Tree};

use crate::features::parsing::ports::{
    body_open_line, leading_doc_comment, ExtractionContext, LanguageId, LanguagePlugin, Scope,
    SpanExt,
};
use crate::shared::models::{Declaration, DeclarationKind, Fidelity, ANONYMOUS};

/// C/C++ language plugin
pub struct CppPlugin;

impl CppPlugin {
    pub fn new() -> Self {
        Self
    }

    /// Extract function definition (free function or method)
    fn extract_function(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let name = node
            .child_by_field_name("declarator")
            .and_then(|d| function_name_node(&d))
            .map(|n| ctx.node_text(&n).to_string())
            .unwrap_or_else(|| ANONYMOUS.to_string());

        // `Foo::bar` defined out of line is still a method
        let kind = if ctx.in_class() || name.contains("::") {
            DeclarationKind::Method
        } else {
            DeclarationKind::Function
        };
        self.declare(ctx, node, name, kind);

        ctx.push_scope(Scope::Function);
        self.extract_children(ctx, node);
        ctx.pop_scope();
    }

    /// Extract class/struct/union specifier with a body
    fn extract_class(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let Some(body) = node.child_by_field_name("body") else {
            // `struct Foo;` forward declaration or a type reference
            return;
        };
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.node_text(&n).to_string())
            .unwrap_or_else(|| ANONYMOUS.to_string());
        self.declare(ctx, node, name, DeclarationKind::Class);

        ctx.push_scope(Scope::Class);
        self.extract_children(ctx, &body);
        ctx.pop_scope();
    }

    fn declare(
        &self,
        ctx: &mut ExtractionContext,
        node: &TSNode,
        name: String,
        kind: DeclarationKind,
    ) {
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

    fn extract_children(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.extract_node(ctx, &child);
        }
    }

    /// Extract a single node
    fn extract_node(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        match node.kind() {
            "function_definition" => self.extract_function(ctx, node),
            "class_specifier" | "struct_specifier" | "union_specifier" => {
                self.extract_class(ctx, node)
            }
            _ => self.extract_children(ctx, node),
        }
    }
}

/// Follow nested declarators down to the function's name
///
/// `int *make(void)` nests the `function_declarator` inside a
/// `pointer_declarator`; the name sits in the function declarator's own
/// `declarator` field.
fn function_name_node<'a>(declarator: &TSNode<'a>) -> Option<TSNode<'a>> {
    let mut current = *declarator;
    loop {
        if current.kind() == "function_declarator" {
            return current.child_by_field_name("declarator");
        }
        current = current.child_by_field_name("declarator")?;
    }
}

impl Default for CppPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePlugin for CppPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        tree_sitter_cpp::language()
    }

    fn language_id(&self) -> LanguageId {
        LanguageId::Cpp
    }

    fn fidelity(&self) -> Fidelity {
        Fidelity::SignatureOnly
    }

    fn collect_declarations(&self, ctx: &mut ExtractionContext, tree: &Tree) {
        self.extract_children(ctx, &tree.root_node());
    }
}
