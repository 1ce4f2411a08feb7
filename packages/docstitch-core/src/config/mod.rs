//! Configuration
//!
//! ```rust,ignore
//! use docstitch_core::config::{DocstitchConfig, FailurePolicy};
//!
//! // Defaults
//! let config = DocstitchConfig::default();
//!
//! // Override a section
//! let config = DocstitchConfig::default()
//!     .patch(|c| c.indent_unit("\t"))
//!     .pipeline(|c| c.on_failure(FailurePolicy::Abort));
//!
//! // From a versioned YAML file
//! let config = DocstitchConfig::from_yaml("docstitch.yaml")?;
//! ```

pub mod docstitch_config;
pub mod error;
pub mod io;
pub mod section_configs;
pub mod validation;

pub use docstitch_config::DocstitchConfig;
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use section_configs::{FailurePolicy, PatchConfig, PipelineConfig, MAX_DOC_BLOCK_LINES};
pub use validation::Validatable;
