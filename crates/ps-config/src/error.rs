//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file {path} does not exist")]
    MissingFile { path: PathBuf },

    #[error("Failed to read configuration file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("No section in configuration file named {section}")]
    MissingSection { section: &'static str },

    #[error("Could not locate key {key} in section {section}")]
    MissingKey {
        section: &'static str,
        key: &'static str,
    },

    #[error("Invalid value in section {section}: {what}")]
    InvalidValue { section: &'static str, what: String },

    #[error("Invalid fan speed table: {0}")]
    InvalidTable(#[from] ps_controls::ControlError),
}
