//! Documentation formats the summarizer is asked for

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Documentation text convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    /// Google style (`Args:` / `Returns:` sections)
    #[default]
    Google,
    /// NumPy style (underlined `Parameters` / `Returns` sections)
    NumPy,
    /// Plain PEP 257 summary and description
    Pep257,
}

impl DocFormat {
    pub const ALL: [DocFormat; 3] = [DocFormat::Google, DocFormat::NumPy, DocFormat::Pep257];

    /// Name used in prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            DocFormat::Google => "Google-style",
            DocFormat::NumPy => "NumPy-style",
            DocFormat::Pep257 => "PEP 257",
        }
    }
}

impl FromStr for DocFormat {
    type Err = ConfigError;

    /// Case-insensitive; `-`, `_` and spaces are ignored (`PEP-257`, `numpy`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "google" => Ok(DocFormat::Google),
            "numpy" => Ok(DocFormat::NumPy),
            "pep257" => Ok(DocFormat::Pep257),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl fmt::Display for DocFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
