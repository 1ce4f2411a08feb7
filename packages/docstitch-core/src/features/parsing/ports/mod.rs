//! Parsing ports (interfaces)

mod language_plugin;

pub use language_plugin::{
    body_open_line, clean_block_comment, leading_doc_comment, ExtractionContext, FoundDoc,
    LanguageId, LanguagePlugin, LanguageRegistry, Scope, SpanExt,
};
