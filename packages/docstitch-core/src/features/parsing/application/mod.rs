//! Parsing application layer

mod extract_declarations;

pub use extract_declarations::{extract, source_for_declaration, ExtractDeclarationsUseCase};
