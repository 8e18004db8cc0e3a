//! Sensor and actuator seams shared by real hardware and the simulator.

use crate::error::{ControlError, ControlResult};
use ps_core::Real;
use serde::{Deserialize, Serialize};

/// One temperature sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Raw CPU temperature in °C.
    pub celsius: Real,
    /// Temperature normalized to `[0, 1]` against the sensor's range.
    pub normalized: Real,
}

/// Bounds used to normalize a raw temperature.
///
/// Below `min` the ratio is 0, at or above `max` it is 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub min: Real,
    pub max: Real,
}

impl TemperatureRange {
    pub fn new(min: Real, max: Real) -> ControlResult<Self> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(ControlError::InvalidArg {
                what: format!("temperature range {min}..{max} must be finite and increasing"),
            });
        }
        Ok(Self { min, max })
    }

    pub fn normalize(&self, celsius: Real) -> Real {
        ((celsius - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    pub fn reading(&self, celsius: Real) -> Reading {
        Reading {
            celsius,
            normalized: self.normalize(celsius),
        }
    }
}

impl Default for TemperatureRange {
    /// 10 °C .. 80 °C.
    fn default() -> Self {
        Self {
            min: 10.0,
            max: 80.0,
        }
    }
}

/// Source of CPU temperature samples.
pub trait TemperatureSensor {
    fn sample(&mut self) -> ControlResult<Reading>;
}

/// Sink for fan duty-cycle commands.
pub trait FanActuator {
    /// Command a duty cycle. Values outside `[0, 1]` must be rejected with
    /// [`ControlError::InvalidArg`], never clamped.
    fn command(&mut self, fraction: Real) -> ControlResult<()>;
}

impl<T: TemperatureSensor + ?Sized> TemperatureSensor for &mut T {
    fn sample(&mut self) -> ControlResult<Reading> {
        (**self).sample()
    }
}

impl<T: FanActuator + ?Sized> FanActuator for &mut T {
    fn command(&mut self, fraction: Real) -> ControlResult<()> {
        (**self).command(fraction)
    }
}

impl<T: TemperatureSensor + ?Sized> TemperatureSensor for Box<T> {
    fn sample(&mut self) -> ControlResult<Reading> {
        (**self).sample()
    }
}

impl<T: FanActuator + ?Sized> FanActuator for Box<T> {
    fn command(&mut self, fraction: Real) -> ControlResult<()> {
        (**self).command(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_clamps_to_unit_interval() {
        let range = TemperatureRange::default();
        assert_eq!(range.normalize(5.0), 0.0);
        assert_eq!(range.normalize(10.0), 0.0);
        assert!((range.normalize(45.0) - 0.5).abs() < 1e-12);
        assert_eq!(range.normalize(80.0), 1.0);
        assert_eq!(range.normalize(95.0), 1.0);
    }

    #[test]
    fn invalid_range_rejected() {
        assert!(TemperatureRange::new(80.0, 10.0).is_err());
        assert!(TemperatureRange::new(10.0, 10.0).is_err());
        assert!(TemperatureRange::new(Real::NAN, 10.0).is_err());
    }
}
