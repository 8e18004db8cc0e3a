//! Fan control laws and the sampling loop for piStor.
//!
//! # Architecture
//!
//! - A [`TemperatureSensor`] produces a [`Reading`] (raw °C plus a ratio
//!   normalized against a [`TemperatureRange`]).
//! - A [`ControlLaw`] turns a reading into a [`FanFraction`]: the continuous
//!   automatic law, the manual [`SpeedTable`] lookup, or a
//!   [`ThresholdPolicy`].
//! - A [`FanActuator`] accepts the resulting duty cycle.
//! - [`ControlLoop`] wires the three together at a fixed sampling interval
//!   and parks the fan when any collaborator fails.
//!
//! Real hardware and the offline simulator implement the same two traits, so
//! the loop runs unmodified against either.
//!
//! [`FanFraction`]: ps_core::FanFraction

pub mod control_loop;
pub mod device;
pub mod error;
pub mod law;
pub mod mode;
pub mod sampled;
pub mod speed;

pub use control_loop::{ControlLoop, LoopReport, LoopState};
pub use device::{FanActuator, Reading, TemperatureRange, TemperatureSensor};
pub use error::{ControlError, ControlResult, FaultKind};
pub use law::{ControlLaw, ThresholdPolicy, automatic_law};
pub use mode::ControlMode;
pub use sampled::LoopOptions;
pub use speed::{SpeedTable, speed_lookup};
