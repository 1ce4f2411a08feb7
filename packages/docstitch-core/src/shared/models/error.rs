//! Error types for the docstitch-core crate
//!
//! One enum covers the whole extract → summarize → patch flow so callers can
//! map each kind to a distinct response (e.g. "unsupported language" vs.
//! "syntax error in source").

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for docstitch operations
#[derive(Debug, Error)]
pub enum DocstitchError {
    /// Language tag outside the supported set; raised before any parsing
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Source text is not valid for the declared grammar
    #[error("Syntax error in {language} source at {line}:{column}: {message}")]
    Parse {
        language: String,
        line: usize,
        column: usize,
        message: String,
    },

    /// The summarizer produced no usable documentation for one declaration
    #[error("Summarization failed for '{name}': {message}")]
    SummarizationFailure { name: String, message: String },

    /// An edit points outside the text it is applied to
    #[error("Invalid edit position {start_line}..={end_line} (text has {line_count} lines): {reason}")]
    InvalidEditPosition {
        start_line: usize,
        end_line: usize,
        line_count: usize,
        reason: String,
    },

    /// An existing documentation block has no closing marker within the scan bound
    #[error("Documentation block opened at line {line} is never closed")]
    UnterminatedDocBlock { line: usize },

    /// Source exceeds the configured size limit
    #[error("Source has {lines} lines; the limit is {limit}")]
    SourceTooLarge { lines: usize, limit: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl DocstitchError {
    pub fn unsupported_language(tag: impl Into<String>) -> Self {
        Self::UnsupportedLanguage(tag.into())
    }

    pub fn parse(
        language: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self::Parse {
            language: language.into(),
            line,
            column,
            message: message.into(),
        }
    }

    pub fn summarization(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SummarizationFailure {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn invalid_edit(
        start_line: usize,
        end_line: usize,
        line_count: usize,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidEditPosition {
            start_line,
            end_line,
            line_count,
            reason: reason.into(),
        }
    }

    /// Errors the caller should report as bad input rather than a server fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedLanguage(_)
                | Self::Parse { .. }
                | Self::UnterminatedDocBlock { .. }
                | Self::SourceTooLarge { .. }
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DocstitchError>;
