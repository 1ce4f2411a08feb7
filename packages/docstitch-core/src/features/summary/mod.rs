//! Summary feature
//!
//! Prompt building and model output parsing for the summarizer boundary.
//! Nothing here performs network I/O.

pub mod format;
pub mod response;

pub use format::DocFormat;
pub use response::{build_prompt, parse_summary_response};
