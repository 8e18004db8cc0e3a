//! Fan control service: mode selection, background worker and shutdown.
//!
//! The shutdown path opens its own handle to the fan and writes 0. It does
//! not signal a loop running elsewhere, so a loop that wakes from its sleep
//! afterwards will overwrite the "off" command on its next sample.

use crate::error::{AppError, AppResult};
use crate::hardware::{Board, HardwareConfig, SysfsPwmFan};
use ps_config::{ConfigFile, DEFAULT_CONFIG_PATH, Settings, resolve};
use ps_controls::{
    ControlLoop, ControlResult, FanActuator, LoopOptions, LoopReport, TemperatureSensor,
};
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tracing::{error, info};

/// Version reported by the daemon.
pub const VERSION: &str = "1.0";

/// Everything the service needs to start.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub config_path: PathBuf,
    pub hardware: HardwareConfig,
    pub options: LoopOptions,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            hardware: HardwareConfig::default(),
            options: LoopOptions::default(),
        }
    }
}

/// Configuration at `path` with defaults applied for anything unusable.
pub fn load_settings(path: &Path) -> Settings {
    resolve(ConfigFile::load(path))
}

/// Select the law from `settings` and run the loop on `device` in the
/// calling thread.
pub fn run_fan_control<D>(
    device: D,
    settings: Settings,
    options: LoopOptions,
) -> AppResult<LoopReport>
where
    D: TemperatureSensor + FanActuator,
{
    let mut control = ControlLoop::new(device, options);
    control.select_mode(settings.mode_code, settings.speed_table)?;
    let report = control.run();
    info!(
        state = ?report.state,
        iterations = report.iterations,
        "fan control loop exited"
    );
    Ok(report)
}

/// Read configuration once, open the device, and run.
pub fn start_fan_control_with<D, O>(
    config_path: &Path,
    open_device: O,
    options: LoopOptions,
) -> AppResult<LoopReport>
where
    D: TemperatureSensor + FanActuator,
    O: FnOnce() -> ControlResult<D>,
{
    let settings = load_settings(config_path);
    let device = open_device().map_err(|err| {
        error!(error = %err, "Cannot set up fan control hardware");
        err
    })?;
    run_fan_control(device, settings, options)
}

/// [`start_fan_control_with`] on the real board.
pub fn start_fan_control(config: &ServiceConfig) -> AppResult<LoopReport> {
    start_fan_control_with(
        &config.config_path,
        || Board::open(&config.hardware),
        config.options,
    )
}

/// Handle to a control loop running on a background thread.
#[derive(Debug)]
pub struct ServiceHandle {
    handle: JoinHandle<AppResult<LoopReport>>,
}

impl ServiceHandle {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.handle.thread().name()
    }

    /// Block until the worker exits.
    pub fn join(self) -> AppResult<LoopReport> {
        self.handle.join().map_err(|_| AppError::Worker {
            message: "fan control worker panicked".to_string(),
        })?
    }
}

/// Start `work` on a named background thread and return immediately.
pub fn spawn_service<F>(work: F) -> AppResult<ServiceHandle>
where
    F: FnOnce() -> AppResult<LoopReport> + Send + 'static,
{
    let handle = thread::Builder::new()
        .name("pistor-fan".to_string())
        .spawn(work)
        .map_err(|e| AppError::Worker {
            message: format!("Could not start service thread: {e}"),
        })?;
    Ok(ServiceHandle { handle })
}

/// [`start_fan_control`] on a background thread.
pub fn spawn_fan_control(config: ServiceConfig) -> AppResult<ServiceHandle> {
    info!("piStor Fan Service starting... Version {VERSION}");
    spawn_service(move || start_fan_control(&config))
}

/// Open a fan with `open_fan` and command it off.
pub fn turn_off_fan<A, O>(open_fan: O) -> AppResult<()>
where
    A: FanActuator,
    O: FnOnce() -> ControlResult<A>,
{
    let result = open_fan().and_then(|mut fan| fan.command(0.0));
    if let Err(err) = &result {
        error!(error = %err, "Could not turn off fan");
    }
    Ok(result?)
}

/// Park the real fan. Independent of any running loop.
pub fn shutdown(hardware: &HardwareConfig) -> AppResult<()> {
    info!("piStor Fan Service stopping...");
    turn_off_fan(|| SysfsPwmFan::from_config(hardware))
}
