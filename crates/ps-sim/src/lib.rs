//! Deterministic board simulator for exercising fan control offline.
//!
//! Provides:
//! - Breakpoint profiles for CPU temperature by sample count and for the
//!   temperature reduction a given fan speed buys
//! - A [`SimulationEngine`] implementing the same sensor/actuator traits as
//!   real hardware
//! - An append-only [`Recorder`] for sample traces, one labelled line per test
//! - A bench driver running a control loop against the simulator

pub mod bench;
pub mod engine;
pub mod error;
pub mod profile;
pub mod recorder;

pub use bench::{BenchPass, BenchReport, run_bench};
pub use engine::{SimulationEngine, SimulationState};
pub use error::{SimError, SimResult};
pub use profile::SimulationProfile;
pub use recorder::Recorder;
