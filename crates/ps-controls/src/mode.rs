//! Control mode selection.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Which law the loop runs. Chosen once when the loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Configured temperature → speed table.
    Manual,
    /// Continuous law on the normalized temperature.
    #[default]
    Automatic,
}

impl ControlMode {
    pub const MANUAL_CODE: i64 = 0;
    pub const AUTOMATIC_CODE: i64 = 1;

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            Self::MANUAL_CODE => Some(Self::Manual),
            Self::AUTOMATIC_CODE => Some(Self::Automatic),
            _ => None,
        }
    }

    /// Like [`ControlMode::from_code`], reverting to automatic (with a
    /// warning) for unrecognized codes.
    pub fn select(code: i64) -> Self {
        Self::from_code(code).unwrap_or_else(|| {
            warn!(code, "Unknown fan mode, reverting to automatic");
            Self::Automatic
        })
    }

    pub fn code(self) -> i64 {
        match self {
            Self::Manual => Self::MANUAL_CODE,
            Self::Automatic => Self::AUTOMATIC_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        assert_eq!(ControlMode::from_code(0), Some(ControlMode::Manual));
        assert_eq!(ControlMode::from_code(1), Some(ControlMode::Automatic));
        assert_eq!(ControlMode::Manual.code(), 0);
    }

    #[test]
    fn unknown_code_selects_automatic() {
        assert_eq!(ControlMode::from_code(7), None);
        assert_eq!(ControlMode::select(7), ControlMode::Automatic);
        assert_eq!(ControlMode::select(-1), ControlMode::Automatic);
        assert_eq!(ControlMode::select(0), ControlMode::Manual);
    }
}
