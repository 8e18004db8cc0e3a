//! Error types for fan control operations.

use ps_core::CoreError;
use thiserror::Error;

/// Result type for fan control operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while sampling, computing or commanding.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Temperature source unavailable or unreadable.
    #[error("Sensor error: {what}")]
    Sensor { what: String },

    /// Fan output unavailable or rejected the write.
    #[error("Actuator error: {what}")]
    Actuator { what: String },

    /// Invalid argument, e.g. a fan command outside `[0, 1]`.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// Breakpoint table could not be built.
    #[error("Breakpoint table error: {0}")]
    Table(CoreError),

    /// Operation not valid in the loop's current state.
    #[error("Control loop state error: {what}")]
    StateError { what: String },
}

/// Coarse classification of a [`ControlError`], for callers that pick a
/// recovery policy per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    Sensor,
    Actuator,
    InvalidArgument,
    Table,
    State,
}

impl ControlError {
    pub fn sensor(what: impl Into<String>) -> Self {
        Self::Sensor { what: what.into() }
    }

    pub fn actuator(what: impl Into<String>) -> Self {
        Self::Actuator { what: what.into() }
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            Self::Sensor { .. } => FaultKind::Sensor,
            Self::Actuator { .. } => FaultKind::Actuator,
            Self::InvalidArg { .. } => FaultKind::InvalidArgument,
            Self::Table(_) => FaultKind::Table,
            Self::StateError { .. } => FaultKind::State,
        }
    }
}

impl From<CoreError> for ControlError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidArg { what } => Self::InvalidArg {
                what: what.to_string(),
            },
            CoreError::NonFinite { .. } => Self::InvalidArg {
                what: err.to_string(),
            },
            other => Self::Table(other),
        }
    }
}
