//! Patching feature
//!
//! Inserts or replaces documentation blocks after declaration headers.

pub mod patcher;
pub mod style;

pub use patcher::{apply, apply_for_language, DocPatcher};
pub use style::DocStyle;
