//! Tree-sitter infrastructure

mod parser;

pub use parser::{first_syntax_error, TreeSitterParser};
