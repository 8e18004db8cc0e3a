//! Temperature and feedback profiles driving the simulator.

use crate::error::SimResult;
use ps_core::{BreakpointTable, Real};

/// Raw CPU temperature (°C) by sample count.
pub const REFERENCE_CPU_PROFILE: [(u64, Real); 14] = [
    (0, 30.0),
    (10, 32.0),
    (11, 34.0),
    (12, 35.0),
    (15, 40.0),
    (25, 50.0),
    (30, 40.0),
    (35, 50.0),
    (40, 40.0),
    (50, 50.0),
    (75, 60.0),
    (90, 55.0),
    (130, 30.0),
    (200, 30.0),
];

/// Temperature reduction (°C) by commanded fan fraction.
pub const REFERENCE_FEEDBACK_PROFILE: [(Real, Real); 10] = [
    (0.0, 0.0),
    (0.1, 2.0),
    (0.2, 5.0),
    (0.3, 10.0),
    (0.5, 20.0),
    (0.6, 30.0),
    (0.7, 35.0),
    (0.8, 37.0),
    (0.9, 40.0),
    (1.0, 50.0),
];

/// CPU and feedback breakpoint tables.
///
/// Both use band lookup, so a key at or past the final breakpoint yields
/// 0: after sample 200 the raw temperature reads 0 °C, and a fan at exactly
/// 1.0 removes nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationProfile {
    pub cpu: BreakpointTable<u64, Real>,
    pub feedback: BreakpointTable<Real, Real>,
}

impl SimulationProfile {
    pub fn new(cpu: Vec<(u64, Real)>, feedback: Vec<(Real, Real)>) -> SimResult<Self> {
        Ok(Self {
            cpu: BreakpointTable::new(cpu)?,
            feedback: BreakpointTable::new(feedback)?,
        })
    }

    pub fn raw_temperature(&self, sample: u64) -> Real {
        self.cpu.lookup(sample)
    }

    pub fn reduction(&self, fan_speed: Real) -> Real {
        self.feedback.lookup(fan_speed)
    }
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            cpu: BreakpointTable::from_ascending(REFERENCE_CPU_PROFILE.to_vec()),
            feedback: BreakpointTable::from_ascending(REFERENCE_FEEDBACK_PROFILE.to_vec()),
        }
    }
}
