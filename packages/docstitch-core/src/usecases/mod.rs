//! Usecase Layer - end-to-end documentation generation
//!
//! Hosts (HTTP handlers, CLIs) call into this layer with a source text and
//! their own summarizer client.

pub mod generate_docs;

// Re-export main API
pub use generate_docs::{
    build_edit_set, DocRecord, GenerateDocsService, GenerateRequest, GenerateResponse, Summarizer,
    SummaryRequest,
};
