//! Generate Docs Service - extract, summarize, patch
//!
//! One request runs the whole flow over a single source text:
//!
//! ```text
//! source ──▶ Extractor ──▶ [Declaration] ──▶ Summarizer (per declaration)
//!                                                 │
//!                        modified source ◀── Patcher ◀── [EditRequest]
//! ```
//!
//! The summarizer is a caller-supplied handle; this service performs no
//! network I/O and calls it sequentially.
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use docstitch_core::usecases::{GenerateDocsService, GenerateRequest};
//!
//! let service = GenerateDocsService::new(DocstitchConfig::default())?;
//! let response = service.generate(&my_client, &GenerateRequest::new("python", code))?;
//! println!("{}", response.modified_code);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{DocstitchConfig, FailurePolicy, Validatable};
use crate::features::parsing::{source_for_declaration, ExtractDeclarationsUseCase, LanguageId};
use crate::features::patching::DocPatcher;
use crate::features::summary::{build_prompt, DocFormat};
use crate::shared::models::{Declaration, DeclarationKind, DocstitchError, EditRequest, Result};
use crate::shared::text::line_count;

/// Everything a summarizer gets for one declaration
#[derive(Debug, Clone)]
pub struct SummaryRequest<'a> {
    pub language: LanguageId,
    pub name: &'a str,
    pub kind: DeclarationKind,
    /// Declaration source (header only for signature-only languages)
    pub code: &'a str,
    pub format: DocFormat,
}

impl SummaryRequest<'_> {
    /// Ready-made instruction text for text-generation backends
    pub fn prompt(&self) -> String {
        build_prompt(self.language.name(), self.name, self.code, self.format)
    }
}

/// Produces documentation text for one declaration
///
/// Implementations typically call a remote model and run the reply through
/// [`crate::features::summary::parse_summary_response`].
pub trait Summarizer: Send + Sync {
    fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String>;
}

/// Generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Language tag (`python`, `js`, `c++`, ...)
    pub language: String,
    pub source: String,
}

impl GenerateRequest {
    pub fn new(language: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            source: source.into(),
        }
    }
}

/// Per-declaration entry of a response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRecord {
    pub name: String,
    pub kind: DeclarationKind,
    #[serde(rename = "start_lineno")]
    pub start_line: usize,
    #[serde(rename = "end_lineno")]
    pub end_line: usize,
    #[serde(rename = "existing_docstring")]
    pub existing_doc: Option<String>,
    #[serde(rename = "generated_docstring")]
    pub generated_doc: Option<String>,
}

impl From<&Declaration> for DocRecord {
    fn from(decl: &Declaration) -> Self {
        Self {
            name: decl.name.clone(),
            kind: decl.kind,
            start_line: decl.start_line,
            end_line: decl.end_line,
            existing_doc: decl.existing_doc.clone(),
            generated_doc: decl.generated_doc.clone(),
        }
    }
}

/// Generation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub modified_code: String,
    /// One record per extracted declaration, in extraction order
    pub docs: Vec<DocRecord>,
}

/// Turn per-declaration summarizer results into patcher edits
///
/// `results` is aligned with `declarations`. A failed result yields no edit
/// under [`FailurePolicy::Skip`], an empty block under
/// [`FailurePolicy::EmptyDoc`], and the error itself under
/// [`FailurePolicy::Abort`].
pub fn build_edit_set(
    declarations: &[Declaration],
    results: Vec<Result<String>>,
    policy: FailurePolicy,
) -> Result<Vec<EditRequest>> {
    let mut edits = Vec::with_capacity(declarations.len());
    for (decl, result) in declarations.iter().zip(results) {
        match (result, policy) {
            (Ok(text), _) => edits.push(EditRequest::for_declaration(decl, text)),
            (Err(_), FailurePolicy::Skip) => {}
            (Err(_), FailurePolicy::EmptyDoc) => edits.push(EditRequest::for_declaration(decl, "")),
            (Err(e), FailurePolicy::Abort) => return Err(e),
        }
    }
    Ok(edits)
}

/// Generate docs service
pub struct GenerateDocsService {
    config: DocstitchConfig,
}

impl GenerateDocsService {
    /// Create a service; the configuration is validated once here
    pub fn new(config: DocstitchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DocstitchConfig {
        &self.config
    }

    /// Run extract → summarize → patch for one source text
    pub fn generate(
        &self,
        summarizer: &dyn Summarizer,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse> {
        let language = LanguageId::from_tag(&request.language)
            .ok_or_else(|| DocstitchError::unsupported_language(&request.language))?;
        let source = request.source.as_str();

        let lines = line_count(source);
        let limit = self.config.pipeline.max_source_lines;
        if lines > limit {
            return Err(DocstitchError::SourceTooLarge { lines, limit });
        }

        info!(
            "Generating docs: language={}, format={}, {} lines",
            language, self.config.pipeline.format, lines
        );

        let mut declarations =
            ExtractDeclarationsUseCase::with_default_registry().execute_for(language, source)?;
        info!("Extraction complete: {} declarations", declarations.len());

        let policy = self.config.pipeline.on_failure;
        let mut results = Vec::with_capacity(declarations.len());
        for decl in &declarations {
            let code = source_for_declaration(source, decl);
            let summary_request = SummaryRequest {
                language,
                name: &decl.name,
                kind: decl.kind,
                code: &code,
                format: self.config.pipeline.format,
            };

            let result = match summarizer.summarize(&summary_request) {
                Ok(text) => {
                    debug!("Documented {} ({} chars)", decl.name, text.len());
                    Ok(text)
                }
                Err(e) if policy == FailurePolicy::Abort => {
                    warn!("Summarization failed for {}, aborting: {}", decl.name, e);
                    return Err(e);
                }
                Err(e) => {
                    warn!("Summarization failed for {}: {}", decl.name, e);
                    Err(e)
                }
            };
            results.push(result);
        }

        for (decl, result) in declarations.iter_mut().zip(&results) {
            decl.generated_doc = result.as_ref().ok().cloned();
        }

        let edits = build_edit_set(&declarations, results, policy)?;
        let patcher = DocPatcher::with_config(language.doc_style(), self.config.patch.clone());
        let modified_code = patcher.apply(source, &edits)?;

        info!(
            "Generation complete: {} of {} declarations documented",
            edits.len(),
            declarations.len()
        );

        Ok(GenerateResponse {
            modified_code,
            docs: declarations.iter().map(DocRecord::from).collect(),
        })
    }
}
