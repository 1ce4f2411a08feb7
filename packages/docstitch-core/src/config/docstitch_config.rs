//! Top-level configuration
//!
//! Defaults work out of the box; sections are overridden either with
//! builder closures or from a versioned YAML file.

use std::path::Path;

use tracing::debug;

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, SUPPORTED_VERSIONS};
use super::section_configs::{PatchConfig, PipelineConfig};
use super::validation::Validatable;

/// Complete docstitch configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocstitchConfig {
    pub patch: PatchConfig,
    pub pipeline: PipelineConfig,
}

impl DocstitchConfig {
    /// Override patch settings
    pub fn patch<F>(mut self, f: F) -> Self
    where
        F: FnOnce(PatchConfig) -> PatchConfig,
    {
        self.patch = f(self.patch);
        self
    }

    /// Override pipeline settings
    pub fn pipeline<F>(mut self, f: F) -> Self
    where
        F: FnOnce(PipelineConfig) -> PipelineConfig,
    {
        self.pipeline = f(self.pipeline);
        self
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        debug!("Loading configuration from {}", path.display());
        Self::from_yaml_str(&content)
    }

    /// Parse and validate YAML configuration text
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        if !SUPPORTED_VERSIONS.contains(&file.version) {
            return Err(ConfigError::UnsupportedVersion {
                found: file.version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let config = Self {
            patch: file.patch.unwrap_or_default(),
            pipeline: file.pipeline.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Export as YAML (schema v1)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: 1,
            patch: Some(self.patch.clone()),
            pipeline: Some(self.pipeline.clone()),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Validatable for DocstitchConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.patch.validate()?;
        self.pipeline.validate()
    }

    fn config_name(&self) -> &'static str {
        "DocstitchConfig"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FailurePolicy;
    use crate::features::summary::DocFormat;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builder_closures() {
        let config = DocstitchConfig::default()
            .patch(|c| c.indent_unit("\t"))
            .pipeline(|c| c.format(DocFormat::NumPy).on_failure(FailurePolicy::Abort));

        assert_eq!(config.patch.indent_unit, "\t");
        assert_eq!(config.patch.max_doc_block_lines, 200);
        assert_eq!(config.pipeline.format, DocFormat::NumPy);
        assert_eq!(config.pipeline.on_failure, FailurePolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = DocstitchConfig::default().patch(|c| c.max_doc_block_lines(50));

        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("version: 1"));
        assert!(yaml.contains("max_doc_block_lines: 50"));
        assert_eq!(DocstitchConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_yaml_loading() {
        let yaml_content = r#"
version: 1
patch:
  indent_unit: "  "
pipeline:
  format: google
  on_failure: empty_doc
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let config = DocstitchConfig::from_yaml(temp_file.path()).unwrap();
        assert_eq!(config.patch.indent_unit, "  ");
        assert_eq!(config.patch.max_doc_block_lines, 200);
        assert_eq!(config.pipeline.format, DocFormat::Google);
        assert_eq!(config.pipeline.on_failure, FailurePolicy::EmptyDoc);
    }

    #[test]
    fn test_yaml_missing_version() {
        let result = DocstitchConfig::from_yaml_str("patch:\n  indent_unit: \"\\t\"\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_unsupported_version() {
        let result = DocstitchConfig::from_yaml_str("version: 2\n");
        assert!(matches!(result, Err(ConfigError::UnsupportedVersion { found: 2, .. })));
    }

    #[test]
    fn test_yaml_unknown_field_rejected() {
        let result = DocstitchConfig::from_yaml_str("version: 1\nmodel: gpt\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_yaml_invalid_range_rejected() {
        let result = DocstitchConfig::from_yaml_str("version: 1\npatch:\n  max_doc_block_lines: 0\n");
        assert!(matches!(result, Err(ConfigError::Range { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = DocstitchConfig::from_yaml(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
