//! Shared service layer for the piStor fan daemon and its tools.
//!
//! Centralizes mode selection from configuration, the background worker
//! lifecycle, fan shutdown, the sysfs hardware collaborators and logging
//! setup, so the binaries stay thin.

pub mod error;
pub mod hardware;
pub mod logging;
pub mod service;

pub use error::{AppError, AppResult};
pub use hardware::{Board, HardwareConfig, SysfsPwmFan, SysfsThermalSensor};
pub use logging::{DEFAULT_LOG_PATH, LogTarget};
pub use service::{
    ServiceConfig, ServiceHandle, VERSION, load_settings, run_fan_control, shutdown,
    spawn_fan_control, spawn_service, start_fan_control, start_fan_control_with, turn_off_fan,
};
