//! TOML configuration file support.
//!
//! Settings that rarely change between runs can live in a config file
//! instead of being passed as flags every time:
//!
//! ```toml
//! # gwchannel.toml
//! [availability]
//! program = "nds2_channel_source"
//! launcher = []
//! host = "nds.ligo.caltech.edu"
//! port = 31200
//! ```
//!
//! Command-line flags always take precedence over file values.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use gwchannel::availability::{AvailabilityConfig, DEFAULT_PROGRAM};

/// Root configuration structure for gwchannel.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Availability-query settings.
    #[serde(default)]
    pub availability: AvailabilitySection,
}

/// Configuration for the availability command.
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilitySection {
    /// Query tool program name or path.
    pub program: Option<String>,

    /// Arguments placed before the program (e.g. an interpreter).
    pub launcher: Option<Vec<String>>,

    /// Data server host name.
    pub host: Option<String>,

    /// Data server port.
    pub port: Option<u16>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

impl AvailabilitySection {
    /// Tool configuration, with `program` overriding the file value.
    pub fn tool_config(&self, program: Option<String>) -> AvailabilityConfig {
        AvailabilityConfig {
            program: program
                .or_else(|| self.program.clone())
                .unwrap_or_else(|| DEFAULT_PROGRAM.to_string()),
            launcher: self.launcher.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [availability]
            program = "/usr/bin/nds2_channel_source"
            launcher = ["env", "NDS2_CLIENT_ALLOW_DATA_ON_TAPE=1"]
            host = "nds.ligo.caltech.edu"
            port = 31200
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(
            config.availability.program.as_deref(),
            Some("/usr/bin/nds2_channel_source")
        );
        assert_eq!(config.availability.host.as_deref(), Some("nds.ligo.caltech.edu"));
        assert_eq!(config.availability.port, Some(31200));

        let tool = config.availability.tool_config(None);
        assert_eq!(tool.program, "/usr/bin/nds2_channel_source");
        assert_eq!(tool.launcher.len(), 2);
    }

    #[test]
    fn test_flag_overrides_file() {
        let config = Config::from_str("[availability]\nprogram = \"a\"\n").unwrap();
        let tool = config.availability.tool_config(Some("b".to_string()));
        assert_eq!(tool.program, "b");
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.availability.host, None);
        assert_eq!(config.availability.tool_config(None), AvailabilityConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_str("[availability]\nport = \"many\"\n").is_err());
    }
}
