//! Manual-mode speed determination from a temperature → percentage table.

use crate::error::{ControlError, ControlResult};
use ps_core::{BreakpointTable, FanFraction, Real};
use tracing::trace;

/// Percentage used when the temperature is below every configured breakpoint.
pub const UNSET_SPEED_PERCENT: i64 = 100;

/// Breakpoints used when no usable table is configured.
pub const DEFAULT_SPEED_POINTS: [(i64, i64); 2] = [(20, 0), (30, 100)];

/// CPU temperature (°C) → fan speed percentage (0-100) breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedTable {
    table: BreakpointTable<i64, i64>,
}

impl SpeedTable {
    /// Build a table from `(temperature, percent)` pairs.
    ///
    /// Keys must be strictly ascending and every percentage within `0..=100`.
    pub fn new(points: Vec<(i64, i64)>) -> ControlResult<Self> {
        if let Some((temp, pct)) = points.iter().find(|(_, pct)| !(0..=100).contains(pct)) {
            return Err(ControlError::InvalidArg {
                what: format!("fan speed {pct}% at {temp}°C is outside 0..=100"),
            });
        }
        Ok(Self {
            table: BreakpointTable::new(points)?,
        })
    }

    pub fn points(&self) -> &[(i64, i64)] {
        self.table.points()
    }

    pub fn breakpoints(&self) -> &BreakpointTable<i64, i64> {
        &self.table
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            table: BreakpointTable::from_ascending(DEFAULT_SPEED_POINTS.to_vec()),
        }
    }
}

/// Fan fraction for `temperature` according to `table`.
///
/// Keeps the percentage of the highest breakpoint at or below the
/// temperature. Below the first breakpoint the fan runs at full speed.
pub fn speed_lookup(temperature: Real, table: &SpeedTable) -> FanFraction {
    let mut speed = None;
    for &(temp, pct) in table.points() {
        trace!(temperature, breakpoint = temp, percent = pct, current = ?speed, "speed table scan");
        if temperature >= temp as Real {
            speed = Some(pct);
        } else {
            break;
        }
    }
    let percent = speed.unwrap_or(UNSET_SPEED_PERCENT);
    FanFraction::saturating(percent as Real / 100.0)
}
