//! Control laws mapping a sensor reading to a fan command.

use crate::device::Reading;
use crate::error::{ControlError, ControlResult};
use crate::speed::{SpeedTable, speed_lookup};
use ps_core::{FanFraction, Real};

/// Headroom the automatic law keeps above the normalized reading.
pub const AUTOMATIC_MARGIN: Real = 0.1;

/// Continuous automatic law: `min(ratio + 0.1, 1.0)`.
///
/// `ratio` is the sensor's temperature normalized to `[0, 1]`.
pub fn automatic_law(ratio: Real) -> FanFraction {
    FanFraction::saturating((ratio + AUTOMATIC_MARGIN).min(1.0))
}

/// Step policy: the first rule whose threshold the temperature strictly
/// exceeds wins, otherwise the floor fraction applies.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdPolicy {
    rules: Vec<(Real, FanFraction)>,
    floor: FanFraction,
}

impl ThresholdPolicy {
    /// Rules are evaluated in the given order.
    pub fn new(rules: Vec<(Real, Real)>, floor: Real) -> ControlResult<Self> {
        let rules = rules
            .into_iter()
            .map(|(threshold, fraction)| -> ControlResult<(Real, FanFraction)> {
                if !threshold.is_finite() {
                    return Err(ControlError::InvalidArg {
                        what: format!("threshold {threshold} is not finite"),
                    });
                }
                Ok((threshold, FanFraction::new(fraction)?))
            })
            .collect::<ControlResult<Vec<_>>>()?;
        Ok(Self {
            rules,
            floor: FanFraction::new(floor)?,
        })
    }

    /// Policy used by the offline bench: >54 → 0.4, >40 → 0.2, >30 → 0.1,
    /// else off.
    pub fn bench() -> Self {
        Self {
            rules: vec![
                (54.0, FanFraction::saturating(0.4)),
                (40.0, FanFraction::saturating(0.2)),
                (30.0, FanFraction::saturating(0.1)),
            ],
            floor: FanFraction::OFF,
        }
    }

    pub fn command(&self, temperature: Real) -> FanFraction {
        self.rules
            .iter()
            .find(|(threshold, _)| temperature > *threshold)
            .map(|(_, fraction)| *fraction)
            .unwrap_or(self.floor)
    }
}

/// The law a running [`ControlLoop`](crate::ControlLoop) applies each sample.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlLaw {
    /// [`automatic_law`] on the normalized reading.
    Automatic,
    /// [`speed_lookup`] on the raw temperature.
    Manual(SpeedTable),
    /// [`ThresholdPolicy::command`] on the raw temperature.
    Threshold(ThresholdPolicy),
}

impl ControlLaw {
    pub fn command(&self, reading: &Reading) -> FanFraction {
        match self {
            Self::Automatic => automatic_law(reading.normalized),
            Self::Manual(table) => speed_lookup(reading.celsius, table),
            Self::Threshold(policy) => policy.command(reading.celsius),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Manual(_) => "manual",
            Self::Threshold(_) => "threshold",
        }
    }
}
