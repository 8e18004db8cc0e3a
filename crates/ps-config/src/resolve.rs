//! Default substitution for missing or malformed configuration.

use crate::error::ConfigResult;
use crate::file::ConfigFile;
use ps_controls::{ControlMode, SpeedTable};
use tracing::warn;

/// Configuration with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Raw mode code; unrecognized codes are kept so mode selection can
    /// report them.
    pub mode_code: i64,
    pub speed_table: SpeedTable,
}

impl Default for Settings {
    /// Automatic mode with the `[(20, 0), (30, 100)]` table.
    fn default() -> Self {
        Self {
            mode_code: ControlMode::AUTOMATIC_CODE,
            speed_table: SpeedTable::default(),
        }
    }
}

impl Settings {
    pub fn from_file(file: &ConfigFile) -> Self {
        let mode_code = file.mode().unwrap_or_else(|err| {
            warn!(error = %err, "fan mode unavailable, using automatic");
            ControlMode::AUTOMATIC_CODE
        });
        let speed_table = file.fan_speeds().unwrap_or_else(|err| {
            warn!(error = %err, "fan speed table unavailable, using default");
            SpeedTable::default()
        });
        Self {
            mode_code,
            speed_table,
        }
    }

    pub fn mode(&self) -> ControlMode {
        ControlMode::select(self.mode_code)
    }
}

/// Settings from a load attempt, falling back to defaults on any error.
pub fn resolve(loaded: ConfigResult<ConfigFile>) -> Settings {
    match loaded {
        Ok(file) => Settings::from_file(&file),
        Err(err) => {
            warn!(error = %err, "configuration unavailable, using defaults");
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn load_failure_yields_defaults() {
        let settings = resolve(Err(ConfigError::MissingSection { section: "mode" }));
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.mode(), ControlMode::Automatic);
        assert_eq!(settings.speed_table.points(), &[(20, 0), (30, 100)]);
    }

    #[test]
    fn sections_default_independently() {
        let file = ConfigFile::from_yaml_str("mode:\n  autofan: 0\n").unwrap();
        let settings = resolve(Ok(file));
        assert_eq!(settings.mode(), ControlMode::Manual);
        assert_eq!(settings.speed_table, SpeedTable::default());

        let file = ConfigFile::from_yaml_str("fan_speeds:\n  35: 50\n  45: 100\n").unwrap();
        let settings = resolve(Ok(file));
        assert_eq!(settings.mode(), ControlMode::Automatic);
        assert_eq!(settings.speed_table.points(), &[(35, 50), (45, 100)]);
    }

    #[test]
    fn unparseable_mode_is_automatic() {
        let file = ConfigFile::from_yaml_str("mode:\n  autofan: fast\n").unwrap();
        assert_eq!(resolve(Ok(file)).mode_code, ControlMode::AUTOMATIC_CODE);
    }

    #[test]
    fn unknown_mode_code_is_kept() {
        let file = ConfigFile::from_yaml_str("mode:\n  autofan: 3\n").unwrap();
        let settings = resolve(Ok(file));
        assert_eq!(settings.mode_code, 3);
        assert_eq!(settings.mode(), ControlMode::Automatic);
    }
}
