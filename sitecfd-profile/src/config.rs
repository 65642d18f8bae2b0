//! Run configuration, loaded from a TOML file.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What to do when a file's aggregated read total is zero.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmptyAggregatePolicy {
    /// Fail the file with [crate::errors::ProfileError::EmptyAggregate].
    #[default]
    Error,
    /// Emit an all-zero normalized series.
    Zeros,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Tab,
    Comma,
}

impl Delimiter {
    pub fn as_byte(&self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tab" | "tsv" => Ok(Delimiter::Tab),
            "comma" | "csv" => Ok(Delimiter::Comma),
            other => Err(format!("Invalid delimiter: {}", other)),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub delimiter: Delimiter,
    /// Directory receiving one strand-aligned per-site table per input file.
    pub per_site_dir: Option<PathBuf>,
    /// JSON file receiving the per-file run summaries.
    pub summary: Option<PathBuf>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ProfileConfig {
    /// Worker threads for processing read-density files in parallel.
    pub threads: usize,
    /// Combine the files that succeeded instead of failing the whole run.
    pub keep_going: bool,
    pub empty_aggregate: EmptyAggregatePolicy,
    pub output: OutputConfig,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            threads: 1,
            keep_going: false,
            empty_aggregate: EmptyAggregatePolicy::default(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid config: threads must be at least 1")]
    InvalidThreads,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ProfileConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        if self.threads == 0 {
            return Err(ConfigError::InvalidThreads);
        }
        Ok(())
    }
}

impl TryFrom<&Path> for ProfileConfig {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        let config: ProfileConfig = toml::from_str(&toml_str)?;
        config.validate()?;
        Ok(config)
    }
}
