//! TypeScript/JavaScript Language Plugin
//!
//! Implements LanguagePlugin for TypeScript/JavaScript source code.
//! Full fidelity: function declarations, classes, methods and function
//! values bound to a name (`const f = () => {}`, class fields, object keys)
//! at any depth.

use tree_sitter::{Language as TSLanguage, Node as TSNode, Tree};

use crate::features::parsing::ports::{
    clean_block_comment, leading_doc_comment, ExtractionContext, FoundDoc, LanguageId,
    LanguagePlugin, Scope, SpanExt,
};
use crate::shared::models::{Declaration, DeclarationKind, Fidelity, ANONYMOUS};

/// TypeScript language plugin
pub struct TypeScriptPlugin {
    /// Whether to use TypeScript or JavaScript grammar
    use_typescript: bool,
}

impl TypeScriptPlugin {
    pub fn new() -> Self {
        Self {
            use_typescript: true,
        }
    }

    pub fn javascript() -> Self {
        Self {
            use_typescript: false,
        }
    }

    /// Extract class declaration
    fn extract_class(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.node_text(&n).to_string())
            .unwrap_or_else(|| ANONYMOUS.to_string());
        self.declare(ctx, node, name, DeclarationKind::Class);

        ctx.push_scope(Scope::Class);
        self.extract_body(ctx, node);
        ctx.pop_scope();
    }

    /// Extract function declaration or method definition
    fn extract_function(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        let name = node
            .child_by_field_name("name")
            .map(|n| ctx.node_text(&n).to_string())
            .unwrap_or_else(|| ANONYMOUS.to_string());
        let kind = if node.kind() == "method_definition" {
            DeclarationKind::Method
        } else {
            DeclarationKind::Function
        };
        self.declare(ctx, node, name, kind);
        self.extract_function_body(ctx, node);
    }

    /// Extract an arrow function / function expression if it is bound to a name
    ///
    /// Unbound function values (callbacks, IIFEs) are not documentable, but
    /// their bodies may still contain declarations.
    fn extract_function_value(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        if let Some((name, kind)) = self.binding_for(ctx, node) {
            self.declare(ctx, node, name, kind);
        }
        self.extract_function_body(ctx, node);
    }

    /// Name and kind a function value gets from where it is bound
    fn binding_for(
        &self,
        ctx: &ExtractionContext,
        node: &TSNode,
    ) -> Option<(String, DeclarationKind)> {
        let parent = node.parent()?;
        let text_of = |field: &str| {
            parent
                .child_by_field_name(field)
                .map(|n| ctx.node_text(&n).to_string())
        };
        match parent.kind() {
            "variable_declarator" => Some((text_of("name")?, DeclarationKind::Function)),
            "public_field_definition" | "field_definition" => {
                let name = text_of("name").or_else(|| text_of("property"))?;
                Some((name, DeclarationKind::Method))
            }
            "pair" => Some((text_of("key")?, DeclarationKind::Method)),
            "export_statement" => Some((ANONYMOUS.to_string(), DeclarationKind::Function)),
            _ => None,
        }
    }

    fn declare(
        &self,
        ctx: &mut ExtractionContext,
        node: &TSNode,
        name: String,
        kind: DeclarationKind,
    ) {
        let header_end = self.header_end_line(node);
        let mut decl = Declaration::new(name, kind, node.to_span()).with_header_end(header_end);
        if let Some(doc) = self.extract_docstring(node, ctx.source) {
            decl = decl.with_existing_doc(doc.text);
            if let Some(span) = doc.span {
                decl = decl.with_doc_span(span);
            }
        }
        ctx.add(decl);
    }

    /// Line of the opening `{`; expression-bodied arrows end on their first line
    fn header_end_line(&self, node: &TSNode) -> usize {
        match node.child_by_field_name("body") {
            Some(body) if is_block(&body) => body.start_position().row + 1,
            _ => node.start_position().row + 1,
        }
    }

    fn extract_function_body(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        ctx.push_scope(Scope::Function);
        self.extract_body(ctx, node);
        ctx.pop_scope();
    }

    fn extract_body(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        if let Some(body) = node.child_by_field_name("body") {
            self.extract_node(ctx, &body);
        }
    }

    /// Extract a single node
    fn extract_node(&self, ctx: &mut ExtractionContext, node: &TSNode) {
        // Keyword tokens share kinds like "class" / "function" with real nodes
        if !node.is_named() {
            return;
        }
        match node.kind() {
            "class_declaration" | "abstract_class_declaration" | "class" => {
                self.extract_class(ctx, node)
            }
            "function_declaration" | "generator_function_declaration" | "method_definition" => {
                self.extract_function(ctx, node)
            }
            "arrow_function" | "function_expression" | "function" | "generator_function" => {
                self.extract_function_value(ctx, node)
            }
            _ => {
                // Recurse for nested declarations
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.extract_node(ctx, &child);
                }
            }
        }
    }
}

fn is_block(node: &TSNode) -> bool {
    matches!(node.kind(), "statement_block" | "class_body")
}

impl Default for TypeScriptPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguagePlugin for TypeScriptPlugin {
    fn tree_sitter_language(&self) -> TSLanguage {
        if self.use_typescript {
            tree_sitter_typescript::language_typescript()
        } else {
            // TSX grammar is a superset that also accepts JSX
            tree_sitter_typescript::language_tsx()
        }
    }

    fn language_id(&self) -> LanguageId {
        if self.use_typescript {
            LanguageId::TypeScript
        } else {
            LanguageId::JavaScript
        }
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
        // JSDoc block placed as the first item inside the body
        let body = node.child_by_field_name("body")?;
        if !is_block(&body) {
            return None;
        }
        let comment = leading_doc_comment(&body, source, body.kind() == "class_body")?;
        Some(FoundDoc {
            text: clean_block_comment(source.get(comment.byte_range())?)?,
            span: Some(comment.to_span()),
        })
    }
}
