//! Extract declarations use case

use once_cell::sync::Lazy;
use tracing::debug;

use crate::features::parsing::infrastructure::TreeSitterParser;
use crate::features::parsing::plugins::create_full_registry;
use crate::features::parsing::ports::{ExtractionContext, LanguageId, LanguageRegistry};
use crate::shared::models::{Declaration, DocstitchError, Fidelity, Result};
use crate::shared::text::slice_lines;

static DEFAULT_REGISTRY: Lazy<LanguageRegistry> = Lazy::new(create_full_registry);

/// Extract declarations use case
pub struct ExtractDeclarationsUseCase<'r> {
    registry: &'r LanguageRegistry,
}

impl ExtractDeclarationsUseCase<'static> {
    /// Use case backed by every built-in plugin
    pub fn with_default_registry() -> Self {
        Self::new(&DEFAULT_REGISTRY)
    }
}

impl<'r> ExtractDeclarationsUseCase<'r> {
    pub fn new(registry: &'r LanguageRegistry) -> Self {
        Self { registry }
    }

    /// Resolve a tag and extract; unknown tags fail before any parsing
    pub fn execute(&self, language: &str, source: &str) -> Result<Vec<Declaration>> {
        let lang = LanguageId::from_tag(language)
            .ok_or_else(|| DocstitchError::unsupported_language(language))?;
        self.execute_for(lang, source)
    }

    /// Extract from `source` with the plugin registered for `lang`
    ///
    /// Declarations come back sorted by `start_line`; the sort is stable, so
    /// at equal lines the outer declaration (found first by the pre-order
    /// walk) stays ahead of the inner one.
    pub fn execute_for(&self, lang: LanguageId, source: &str) -> Result<Vec<Declaration>> {
        let plugin = self
            .registry
            .get(lang)
            .ok_or_else(|| DocstitchError::unsupported_language(lang.name()))?;

        let tree = TreeSitterParser::new(plugin).parse(source)?;

        let mut ctx = ExtractionContext::new(source);
        plugin.collect_declarations(&mut ctx, &tree);

        let mut declarations = ctx.declarations;
        declarations.sort_by_key(|d| d.start_line);

        debug!(
            "Extracted {} declarations from {} source ({} bytes)",
            declarations.len(),
            lang,
            source.len()
        );
        Ok(declarations)
    }
}

/// Extract declarations from `source` written in `language`
pub fn extract(language: &str, source: &str) -> Result<Vec<Declaration>> {
    ExtractDeclarationsUseCase::with_default_registry().execute(language, source)
}

/// Source slice handed to the summarizer for one declaration
///
/// Full fidelity yields the whole declaration; signature-only yields the
/// header lines.
pub fn source_for_declaration(source: &str, decl: &Declaration) -> String {
    let end = match decl.fidelity {
        Fidelity::Full => decl.end_line,
        Fidelity::SignatureOnly => decl.header_end_line.max(decl.start_line),
    };
    slice_lines(source, decl.start_line, end)
}
