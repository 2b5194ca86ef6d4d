//! # CLI Configuration
//!
//! Optional YAML file loaded with `--config`. Command-line flags take
//! precedence over values read from the file.
//!
//! ```yaml
//! log_format: json
//! max_document_bytes: 65536
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Largest document accepted by default (1 MiB).
pub const DEFAULT_MAX_DOCUMENT_BYTES: u64 = 1024 * 1024;

/// Format of log lines written to stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Settings shared by all subcommands.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub log_format: LogFormat,
    pub max_document_bytes: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Text,
            max_document_bytes: DEFAULT_MAX_DOCUMENT_BYTES,
        }
    }
}

impl CliConfig {
    /// Load the file at `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Parse and validate YAML text. An empty document yields defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        mut self,
        log_format: Option<LogFormat>,
        max_document_bytes: Option<u64>,
    ) -> Result<Self> {
        if let Some(format) = log_format {
            self.log_format = format;
        }
        if let Some(max) = max_document_bytes {
            self.max_document_bytes = max;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.max_document_bytes == 0 {
            bail!("max_document_bytes must be greater than zero");
        }
        Ok(())
    }
}
