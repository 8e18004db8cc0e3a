//! The sampling loop state machine.
//!
//! ```text
//! SelectingMode ──► RunningAutomatic ─┬─► Faulted
//!               └─► RunningManual   ──┤
//! (with_law)    └─► RunningThreshold ─┴─► Stopped
//! ```
//!
//! Any sensor or actuator failure while running parks the fan at 0 and moves
//! the loop to `Faulted` for good. `Stopped` is reached when a bounded run
//! uses up its iteration budget; an unbounded loop only ends by faulting or
//! by the process being terminated.

use crate::device::{FanActuator, TemperatureSensor};
use crate::error::{ControlError, ControlResult};
use crate::law::ControlLaw;
use crate::mode::ControlMode;
use crate::sampled::LoopOptions;
use crate::speed::SpeedTable;
use ps_core::FanFraction;
use std::thread;
use tracing::{debug, error, info};

/// Lifecycle state of a [`ControlLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    SelectingMode,
    RunningAutomatic,
    RunningManual,
    RunningThreshold,
    Faulted,
    Stopped,
}

impl LoopState {
    pub fn is_running(self) -> bool {
        matches!(
            self,
            Self::RunningAutomatic | Self::RunningManual | Self::RunningThreshold
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Faulted | Self::Stopped)
    }

    fn for_law(law: &ControlLaw) -> Self {
        match law {
            ControlLaw::Automatic => Self::RunningAutomatic,
            ControlLaw::Manual(_) => Self::RunningManual,
            ControlLaw::Threshold(_) => Self::RunningThreshold,
        }
    }
}

/// Outcome of [`ControlLoop::run`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoopReport {
    pub state: LoopState,
    pub iterations: u64,
    pub last_command: Option<FanFraction>,
    pub fault: Option<ControlError>,
}

/// Closed-loop fan controller over a device that is both sensor and
/// actuator.
#[derive(Debug)]
pub struct ControlLoop<D> {
    device: D,
    options: LoopOptions,
    law: Option<ControlLaw>,
    state: LoopState,
    iteration: u64,
    last_command: Option<FanFraction>,
}

impl<D> ControlLoop<D>
where
    D: TemperatureSensor + FanActuator,
{
    /// New loop waiting in `SelectingMode`.
    pub fn new(device: D, options: LoopOptions) -> Self {
        Self {
            device,
            options,
            law: None,
            state: LoopState::SelectingMode,
            iteration: 0,
            last_command: None,
        }
    }

    /// New loop already running `law`.
    pub fn with_law(device: D, law: ControlLaw, options: LoopOptions) -> Self {
        let mut control = Self::new(device, options);
        control.enter(law);
        control
    }

    /// Leave `SelectingMode`: code 0 binds `table` and runs manual, anything
    /// else runs automatic (unknown codes are warned about).
    pub fn select_mode(&mut self, mode_code: i64, table: SpeedTable) -> ControlResult<LoopState> {
        if self.state != LoopState::SelectingMode {
            return Err(ControlError::StateError {
                what: format!("mode already selected ({:?})", self.state),
            });
        }
        let law = match ControlMode::select(mode_code) {
            ControlMode::Manual => ControlLaw::Manual(table),
            ControlMode::Automatic => ControlLaw::Automatic,
        };
        self.enter(law);
        Ok(self.state)
    }

    fn enter(&mut self, law: ControlLaw) {
        match &law {
            ControlLaw::Manual(table) => info!(
                table = ?table.points(),
                "Starting fan control service in manual mode"
            ),
            other => info!("Starting fan control service in {} mode", other.name()),
        }
        self.state = LoopState::for_law(&law);
        self.law = Some(law);
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn iterations(&self) -> u64 {
        self.iteration
    }

    pub fn law(&self) -> Option<&ControlLaw> {
        self.law.as_ref()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    /// One sample → compute → command cycle, without sleeping.
    ///
    /// Collaborator errors are returned as-is; the loop state is not
    /// changed here. [`ControlLoop::run`] decides what a failure means.
    pub fn step(&mut self) -> ControlResult<FanFraction> {
        let law = match (&self.law, self.state.is_running()) {
            (Some(law), true) => law,
            _ => {
                return Err(ControlError::StateError {
                    what: format!("cannot step while {:?}", self.state),
                });
            }
        };

        let reading = self.device.sample()?;
        let command = law.command(&reading);

        if self.options.emits_diagnostic(self.iteration) {
            debug!(
                cpu = reading.celsius,
                fan = command.value(),
                cpu_value = reading.normalized,
                iteration = self.iteration,
                "fan control diagnostic"
            );
        }

        self.device.command(command.value())?;
        self.last_command = Some(command);
        self.iteration += 1;
        Ok(command)
    }

    /// Run until a fault, or until the iteration budget is spent.
    pub fn run(&mut self) -> LoopReport {
        if !self.state.is_running() {
            return self.report(Some(ControlError::StateError {
                what: format!("cannot run while {:?}", self.state),
            }));
        }

        loop {
            if self.options.exhausted(self.iteration) {
                info!(iterations = self.iteration, "fan control loop stopped");
                self.state = LoopState::Stopped;
                return self.report(None);
            }

            if let Err(err) = self.step() {
                self.fault(&err);
                return self.report(Some(err));
            }

            if !self.options.interval.is_zero() {
                thread::sleep(self.options.interval);
            }
        }
    }

    fn fault(&mut self, err: &ControlError) {
        if let Err(park_err) = self.device.command(FanFraction::OFF.value()) {
            error!(error = %park_err, "Could not park fan after fault");
        } else {
            self.last_command = Some(FanFraction::OFF);
        }
        error!(
            error = %err,
            kind = ?err.kind(),
            "An error occurred during fan speed processing"
        );
        self.state = LoopState::Faulted;
    }

    fn report(&self, fault: Option<ControlError>) -> LoopReport {
        LoopReport {
            state: self.state,
            iterations: self.iteration,
            last_command: self.last_command,
            fault,
        }
    }
}
