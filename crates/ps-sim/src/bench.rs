//! Bench driver: a threshold-policy control loop against the simulator.

use crate::engine::SimulationEngine;
use crate::error::{SimError, SimResult};
use ps_controls::{
    ControlLaw, ControlLoop, ControlResult, FanActuator, LoopOptions, LoopReport, Reading,
    TemperatureSensor, ThresholdPolicy,
};
use ps_core::Real;
use std::io::Write;
use std::time::Duration;

/// One sample → command cycle of a bench run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchPass {
    pub pass: usize,
    pub temperature: Real,
    pub fan: Real,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BenchReport {
    pub passes: Vec<BenchPass>,
    pub loop_report: LoopReport,
}

/// Pairs each sample with the command that follows it.
struct Traced<'a, W: Write, F> {
    engine: &'a mut SimulationEngine<W>,
    pending: Option<Real>,
    passes: Vec<BenchPass>,
    on_pass: F,
}

impl<W: Write, F: FnMut(&BenchPass)> TemperatureSensor for Traced<'_, W, F> {
    fn sample(&mut self) -> ControlResult<Reading> {
        let reading = self.engine.sample()?;
        self.pending = Some(reading.celsius);
        Ok(reading)
    }
}

impl<W: Write, F: FnMut(&BenchPass)> FanActuator for Traced<'_, W, F> {
    fn command(&mut self, fraction: Real) -> ControlResult<()> {
        self.engine.command(fraction)?;
        // A park after a sensor fault has no sample to pair with.
        if let Some(temperature) = self.pending.take() {
            let pass = BenchPass {
                pass: self.passes.len(),
                temperature,
                fan: fraction,
            };
            (self.on_pass)(&pass);
            self.passes.push(pass);
        }
        Ok(())
    }
}

/// Run `passes` iterations of `policy` against `engine`, pausing `pause`
/// between passes and reporting each one to `on_pass`.
pub fn run_bench<W, F>(
    engine: &mut SimulationEngine<W>,
    policy: ThresholdPolicy,
    passes: u64,
    pause: Duration,
    on_pass: F,
) -> SimResult<BenchReport>
where
    W: Write,
    F: FnMut(&BenchPass),
{
    let traced = Traced {
        engine,
        pending: None,
        passes: Vec::new(),
        on_pass,
    };
    let options = LoopOptions::bounded(passes).with_interval(pause);
    let mut control = ControlLoop::with_law(traced, ControlLaw::Threshold(policy), options);
    let loop_report = control.run();
    if let Some(fault) = loop_report.fault.clone() {
        return Err(SimError::Control(fault));
    }
    Ok(BenchReport {
        passes: control.into_device().passes,
        loop_report,
    })
}
