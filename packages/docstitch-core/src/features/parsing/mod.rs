//! Parsing Feature (Extractor)
//!
//! Responsible for turning source text into an ordered list of
//! documentable declarations.
//!
//! ## Structure
//! - `domain/` - SyntaxError model
//! - `ports/` - LanguagePlugin trait, LanguageRegistry
//! - `application/` - ExtractDeclarationsUseCase
//! - `infrastructure/` - TreeSitterParser
//! - `plugins/` - Language-specific plugins (Python, JS/TS, Java, C/C++)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod plugins;
pub mod ports;

// Re-exports
pub use application::{extract, source_for_declaration, ExtractDeclarationsUseCase};
pub use plugins::{
    create_full_registry, create_registry, CppPlugin, JavaPlugin, PythonPlugin, TypeScriptPlugin,
};
pub use ports::{ExtractionContext, LanguageId, LanguagePlugin, LanguageRegistry, SpanExt};
