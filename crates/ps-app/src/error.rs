//! Error types for the ps-app service layer.

/// Application error type wrapping the backend crates' errors behind one
/// interface for the binaries.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ps_config::ConfigError),

    #[error("Fan control error: {0}")]
    Control(#[from] ps_controls::ControlError),

    #[error("Simulation error: {0}")]
    Simulation(#[from] ps_sim::SimError),

    #[error("Worker error: {message}")]
    Worker { message: String },

    #[error("Logging setup failed: {message}")]
    Logging { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ps-app operations.
pub type AppResult<T> = Result<T, AppError>;
