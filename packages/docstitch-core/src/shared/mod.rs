//! Shared module - Common types and utilities
//!
//! Types exchanged between the extractor, the patcher and callers.
//! Nothing in here depends on tree-sitter.

pub mod models;
pub mod text;

// Re-exports for convenience
pub use models::*;
