//! Common test utilities for docstitch-core
//!
//! Shared fixtures, summarizer doubles and assertions for integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;
mod summarizers;

// Re-export all utilities
pub use assertions::*;
pub use fixtures::*;
pub use summarizers::*;
