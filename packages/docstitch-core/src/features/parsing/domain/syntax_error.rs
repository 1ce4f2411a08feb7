//! Syntax error found in a parsed tree

use crate::shared::models::{DocstitchError, Span};

/// First syntax problem reported by the grammar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    pub fn into_error(self, language: &str) -> DocstitchError {
        DocstitchError::parse(
            language,
            self.span.start_line,
            self.span.start_col,
            self.message,
        )
    }
}
