use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Breakpoint table is empty")]
    EmptyTable,

    #[error("Breakpoint keys must be strictly ascending (violated at index {index})")]
    NotAscending { index: usize },
}
