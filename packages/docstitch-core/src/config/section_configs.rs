//! Per-section configuration structs
//!
//! Each section validates its own ranges; [`super::DocstitchConfig`] composes
//! them.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::validation::Validatable;
use crate::features::summary::DocFormat;

/// Upper bound for the closing-marker scan
pub const MAX_DOC_BLOCK_LINES: usize = 10_000;

// ============================================================================
// Patch
// ============================================================================

/// Patcher settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Whitespace added to the declaration's indentation for its block
    pub indent_unit: String,

    /// Lines scanned for the closing marker of an existing block (1..=10000)
    pub max_doc_block_lines: usize,

    /// Take the block's indentation from the first body line when it is
    /// indented deeper than the declaration
    pub infer_indent: bool,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            indent_unit: "    ".to_string(),
            max_doc_block_lines: 200,
            infer_indent: true,
        }
    }
}

impl PatchConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.indent_unit.is_empty() || !self.indent_unit.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::Validation(format!(
                "indent_unit must be one or more spaces or tabs, got {:?}",
                self.indent_unit
            )));
        }

        if self.max_doc_block_lines == 0 || self.max_doc_block_lines > MAX_DOC_BLOCK_LINES {
            return Err(ConfigError::range_with_hint(
                "max_doc_block_lines",
                self.max_doc_block_lines,
                1,
                MAX_DOC_BLOCK_LINES,
                "Scan at least one line for a closing marker",
            ));
        }

        Ok(())
    }

    /// Builder: Set indent_unit
    pub fn indent_unit(mut self, v: impl Into<String>) -> Self {
        self.indent_unit = v.into();
        self
    }

    /// Builder: Set max_doc_block_lines
    pub fn max_doc_block_lines(mut self, v: usize) -> Self {
        self.max_doc_block_lines = v;
        self
    }

    /// Builder: Set infer_indent
    pub fn infer_indent(mut self, v: bool) -> Self {
        self.infer_indent = v;
        self
    }
}

impl Validatable for PatchConfig {
    fn validate(&self) -> ConfigResult<()> {
        PatchConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "PatchConfig"
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// What to do when the summarizer fails for one declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Leave the declaration untouched
    #[default]
    Skip,
    /// Insert an empty documentation block
    EmptyDoc,
    /// Fail the whole request
    Abort,
}

/// Generation pipeline settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Documentation format requested from the summarizer
    pub format: DocFormat,

    /// Failure handling per declaration
    pub on_failure: FailurePolicy,

    /// Largest accepted source, in lines (1..=1000000)
    pub max_source_lines: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            format: DocFormat::default(),
            on_failure: FailurePolicy::default(),
            max_source_lines: 50_000,
        }
    }
}

impl PipelineConfig {
    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_source_lines == 0 || self.max_source_lines > 1_000_000 {
            return Err(ConfigError::range_with_hint(
                "max_source_lines",
                self.max_source_lines,
                1,
                1_000_000,
                "Source size limit must be positive and bounded",
            ));
        }
        Ok(())
    }

    /// Builder: Set format
    pub fn format(mut self, v: DocFormat) -> Self {
        self.format = v;
        self
    }

    /// Builder: Set on_failure
    pub fn on_failure(mut self, v: FailurePolicy) -> Self {
        self.on_failure = v;
        self
    }

    /// Builder: Set max_source_lines
    pub fn max_source_lines(mut self, v: usize) -> Self {
        self.max_source_lines = v;
        self
    }
}

impl Validatable for PipelineConfig {
    fn validate(&self) -> ConfigResult<()> {
        PipelineConfig::validate(self)
    }

    fn config_name(&self) -> &'static str {
        "PipelineConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_defaults_are_valid() {
        let config = PatchConfig::default();
        assert_eq!(config.indent_unit, "    ");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_indent_unit_must_be_whitespace() {
        assert!(PatchConfig::default().indent_unit("").validate().is_err());
        assert!(PatchConfig::default().indent_unit("--").validate().is_err());
        assert!(PatchConfig::default().indent_unit("\t").validate().is_ok());
    }

    #[test]
    fn test_scan_bound_range() {
        let err = PatchConfig::default().max_doc_block_lines(0).validate().unwrap_err();
        assert!(matches!(err, ConfigError::Range { ref field, .. } if field == "max_doc_block_lines"));
        assert!(PatchConfig::default()
            .max_doc_block_lines(MAX_DOC_BLOCK_LINES + 1)
            .validate()
            .is_err());
        assert!(PatchConfig::default()
            .max_doc_block_lines(MAX_DOC_BLOCK_LINES)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_pipeline_validation() {
        assert!(PipelineConfig::default().validate().is_ok());
        assert!(PipelineConfig::default().max_source_lines(0).validate().is_err());
    }

    #[test]
    fn test_failure_policy_serde_names() {
        let yaml = serde_yaml::to_string(&FailurePolicy::EmptyDoc).unwrap();
        assert_eq!(yaml.trim(), "empty_doc");
        let policy: FailurePolicy = serde_yaml::from_str("abort").unwrap();
        assert_eq!(policy, FailurePolicy::Abort);
    }

    #[test]
    fn test_config_names() {
        assert_eq!(Validatable::config_name(&PatchConfig::default()), "PatchConfig");
        assert_eq!(Validatable::config_name(&PipelineConfig::default()), "PipelineConfig");
    }
}
