/*
 * docstitch - documentation block generation for source files
 *
 * Feature-First Architecture:
 * - shared/      : Common models (Declaration, EditRequest, Span, errors)
 * - features/    : Vertical slices (parsing → summary → patching)
 * - config/      : Versioned YAML configuration
 * - usecases/    : End-to-end generation service
 *
 * Extraction and patching are pure and synchronous; the text-generation
 * backend is supplied by the host through the `Summarizer` trait.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

pub mod config;
pub mod features;
pub mod shared;
pub mod usecases;

pub use config::{ConfigError, DocstitchConfig, FailurePolicy, PatchConfig, PipelineConfig};
pub use features::parsing::{extract, source_for_declaration, LanguageId};
pub use features::patching::{apply, apply_for_language, DocPatcher, DocStyle};
pub use features::summary::{build_prompt, parse_summary_response, DocFormat};
pub use shared::models::{
    Declaration, DeclarationKind, DocstitchError, EditRequest, ExistingBlock, Fidelity, InlineBody,
    Result, Span, ANONYMOUS,
};
pub use usecases::{
    build_edit_set, DocRecord, GenerateDocsService, GenerateRequest, GenerateResponse, Summarizer,
    SummaryRequest,
};
