//! Error types for simulation operations.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Recording failed: {0}")]
    Recording(#[from] std::io::Error),

    #[error("Control error: {0}")]
    Control(#[from] ps_controls::ControlError),

    #[error("Invalid profile: {0}")]
    Profile(#[from] ps_core::CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
