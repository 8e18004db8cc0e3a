//! Closed-loop board simulator.
//!
//! Temperature is `cpu_profile(sample_count) - feedback_profile(fan_speed)`,
//! where `fan_speed` is whatever was last commanded. The engine is
//! single-threaded and fully deterministic for a given profile and command
//! sequence.

use crate::error::SimResult;
use crate::profile::SimulationProfile;
use crate::recorder::Recorder;
use ps_controls::{
    ControlError, ControlResult, FanActuator, Reading, TemperatureRange, TemperatureSensor,
};
use ps_core::Real;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::debug;

/// Mutable simulator bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    /// Last value returned by a temperature sample.
    pub current_temp: Real,
    /// Samples taken since the last reset; also the CPU profile key.
    pub sample_count: u64,
    /// Successful fan commands since the last reset.
    pub fan_calls: u64,
    /// Last commanded fan fraction. Survives resets.
    pub fan_speed: Real,
    /// Label of the test currently running, if any.
    pub test_name: Option<String>,
}

/// Simulated board exposing the sensor and actuator traits.
#[derive(Debug)]
pub struct SimulationEngine<W: Write = BufWriter<File>> {
    profile: SimulationProfile,
    range: TemperatureRange,
    state: SimulationState,
    recorder: Option<Recorder<W>>,
}

impl SimulationEngine {
    /// Engine without recording.
    pub fn new(profile: SimulationProfile) -> Self {
        Self {
            profile,
            range: TemperatureRange::default(),
            state: SimulationState::default(),
            recorder: None,
        }
    }

    /// Engine on the reference profiles, without recording.
    pub fn reference() -> Self {
        Self::new(SimulationProfile::default())
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::reference()
    }
}

impl<W: Write> SimulationEngine<W> {
    /// Engine appending every sample to `recorder`.
    pub fn with_recorder(profile: SimulationProfile, recorder: Recorder<W>) -> Self {
        Self {
            profile,
            range: TemperatureRange::default(),
            state: SimulationState::default(),
            recorder: Some(recorder),
        }
    }

    /// Range used to normalize temperatures for [`TemperatureSensor::sample`].
    pub fn with_range(mut self, range: TemperatureRange) -> Self {
        self.range = range;
        self
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn profile(&self) -> &SimulationProfile {
        &self.profile
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Advance one sample and return the simulated temperature.
    pub fn sample_temperature(&mut self) -> SimResult<Real> {
        self.state.sample_count += 1;
        let raw = self.profile.raw_temperature(self.state.sample_count);
        let reduction = self.profile.reduction(self.state.fan_speed);
        let temp = raw - reduction;
        debug!(raw, reduction, temp, sample = self.state.sample_count, "simulated sample");
        self.state.current_temp = temp;

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record(temp)?;
        }
        Ok(temp)
    }

    /// Store `fraction` as the fan speed for subsequent samples.
    ///
    /// Values outside `[0, 1]` (and NaN) are rejected.
    pub fn command_fan(&mut self, fraction: Real) -> ControlResult<()> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ControlError::InvalidArg {
                what: format!("fan speed {fraction} outside [0, 1]"),
            });
        }
        self.state.fan_calls += 1;
        self.state.fan_speed = fraction;
        Ok(())
    }

    /// Reset counters and temperature, and open a new recording segment.
    pub fn start_named_test(&mut self, name: &str) -> SimResult<()> {
        self.reset_system();
        self.state.test_name = Some(name.to_string());
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.begin_segment(name)?;
        }
        Ok(())
    }

    /// Reset counters and temperature; recording is left alone.
    pub fn reset_system(&mut self) {
        self.state.current_temp = 0.0;
        self.state.sample_count = 0;
        self.state.fan_calls = 0;
    }

    /// Flush and close the recording, returning its writer.
    pub fn finish(self) -> SimResult<Option<W>> {
        self.recorder.map(Recorder::finish).transpose()
    }
}

impl<W: Write> TemperatureSensor for SimulationEngine<W> {
    fn sample(&mut self) -> ControlResult<Reading> {
        let temp = self
            .sample_temperature()
            .map_err(|e| ControlError::sensor(e.to_string()))?;
        Ok(self.range.reading(temp))
    }
}

impl<W: Write> FanActuator for SimulationEngine<W> {
    fn command(&mut self, fraction: Real) -> ControlResult<()> {
        self.command_fan(fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_controls::FaultKind;

    #[test]
    fn fixed_fan_follows_cpu_profile() {
        let mut sim = SimulationEngine::reference();
        assert_eq!(sim.sample_temperature().unwrap(), 30.0);
        assert_eq!(sim.sample_temperature().unwrap(), 30.0);
        for _ in 3..10 {
            sim.sample_temperature().unwrap();
        }
        assert_eq!(sim.sample_temperature().unwrap(), 32.0);
        assert_eq!(sim.state().sample_count, 10);
        assert_eq!(sim.state().current_temp, 32.0);
    }

    #[test]
    fn fan_speed_reduces_temperature() {
        let mut sim = SimulationEngine::reference();
        sim.command_fan(0.4).unwrap();
        assert_eq!(sim.sample_temperature().unwrap(), 20.0);
        assert_eq!(sim.state().fan_calls, 1);
    }

    #[test]
    fn command_fan_range() {
        let mut sim = SimulationEngine::reference();
        for bad in [1.5, -0.1, Real::NAN] {
            let err = sim.command_fan(bad).unwrap_err();
            assert_eq!(err.kind(), FaultKind::InvalidArgument);
        }
        assert_eq!(sim.state().fan_calls, 0);
        sim.command_fan(0.0).unwrap();
        sim.command_fan(1.0).unwrap();
        assert_eq!(sim.state().fan_calls, 2);
        assert_eq!(sim.state().fan_speed, 1.0);
    }

    #[test]
    fn reset_and_named_tests() {
        let mut sim = SimulationEngine::reference();
        for _ in 0..12 {
            sim.sample_temperature().unwrap();
        }
        sim.command_fan(0.1).unwrap();

        sim.reset_system();
        assert_eq!(sim.state().sample_count, 0);
        assert_eq!(sim.state().fan_calls, 0);
        assert_eq!(sim.state().current_temp, 0.0);
        assert_eq!(sim.state().fan_speed, 0.1);

        sim.start_named_test("second").unwrap();
        assert_eq!(sim.state().test_name.as_deref(), Some("second"));
        assert_eq!(sim.sample_temperature().unwrap(), 28.0);
    }

    #[test]
    fn recording_segments() {
        let recorder = Recorder::new(Vec::new());
        let mut sim = SimulationEngine::with_recorder(SimulationProfile::default(), recorder);
        assert!(sim.is_recording());
        sim.start_named_test("first").unwrap();
        sim.sample_temperature().unwrap();
        sim.sample_temperature().unwrap();
        sim.start_named_test("second").unwrap();
        sim.command_fan(0.2).unwrap();
        sim.sample_temperature().unwrap();

        let out = sim.finish().unwrap().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\nfirst,30,30\nsecond,25");
    }

    #[test]
    fn sensor_reading_is_normalized() {
        let mut sim = SimulationEngine::reference();
        let reading = sim.sample().unwrap();
        assert_eq!(reading.celsius, 30.0);
        assert!((reading.normalized - 20.0 / 70.0).abs() < 1e-12);
    }
}
