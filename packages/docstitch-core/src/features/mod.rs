//! Feature modules
//!
//! - `parsing`: declaration extraction
//! - `patching`: documentation block insertion
//! - `summary`: summarizer prompt and response handling

pub mod parsing;
pub mod patching;
pub mod summary;
