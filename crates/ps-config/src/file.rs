//! YAML configuration file access.
//!
//! ```yaml
//! mode:
//!   autofan: 0
//! fan_speeds:
//!   40: 20
//!   50: 45
//!   60: 80
//! ```
//!
//! Integers may also be written as strings (`"40": "20"`). Speed pairs are
//! kept in file order.

use crate::error::{ConfigError, ConfigResult};
use ps_controls::SpeedTable;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "/etc/pistor.yaml";
pub const MODE_SECTION: &str = "mode";
pub const MODE_KEY: &str = "autofan";
pub const FAN_SPEEDS_SECTION: &str = "fan_speeds";

/// A parsed configuration document.
#[derive(Debug, Clone, Default)]
pub struct ConfigFile {
    path: Option<PathBuf>,
    root: Mapping,
}

impl ConfigFile {
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::MissingFile {
                path: path.to_path_buf(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file = Self::from_yaml_str(&text)?;
        file.path = Some(path.to_path_buf());
        Ok(file)
    }

    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let root = match serde_yaml::from_str::<Value>(text)? {
            Value::Null => Mapping::new(),
            Value::Mapping(root) => root,
            _ => {
                return Err(ConfigError::InvalidValue {
                    section: "<root>",
                    what: "document must be a mapping of sections".to_string(),
                });
            }
        };
        Ok(Self { path: None, root })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Section names in document order.
    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.root.keys().filter_map(Value::as_str)
    }

    fn section(&self, section: &'static str) -> ConfigResult<&Mapping> {
        match self.root.get(section) {
            None => Err(ConfigError::MissingSection { section }),
            Some(Value::Mapping(map)) => Ok(map),
            Some(_) => Err(ConfigError::InvalidValue {
                section,
                what: "section must be a mapping".to_string(),
            }),
        }
    }

    /// Raw `mode.autofan` code.
    pub fn mode(&self) -> ConfigResult<i64> {
        let section = self.section(MODE_SECTION)?;
        let value = section.get(MODE_KEY).ok_or(ConfigError::MissingKey {
            section: MODE_SECTION,
            key: MODE_KEY,
        })?;
        as_integer(value).ok_or_else(|| ConfigError::InvalidValue {
            section: MODE_SECTION,
            what: format!("{MODE_KEY} must be an integer, got {value:?}"),
        })
    }

    /// `fan_speeds` as a speed table, in file order.
    pub fn fan_speeds(&self) -> ConfigResult<SpeedTable> {
        let section = self.section(FAN_SPEEDS_SECTION)?;
        let points = section
            .iter()
            .map(|(temp, speed)| -> ConfigResult<(i64, i64)> {
                let invalid = || ConfigError::InvalidValue {
                    section: FAN_SPEEDS_SECTION,
                    what: format!("{temp:?}: {speed:?} is not an integer pair"),
                };
                Ok((
                    as_integer(temp).ok_or_else(invalid)?,
                    as_integer(speed).ok_or_else(invalid)?,
                ))
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(SpeedTable::new(points)?)
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
