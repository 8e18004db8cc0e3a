//! Configuration collaborator for the piStor fan daemon.
//!
//! Reading is split in two steps. [`ConfigFile`] hands back every section as
//! a typed [`ConfigResult`], so a missing section is distinguishable from a
//! malformed one. [`resolve`] then applies the documented defaults and logs
//! each substitution.

pub mod error;
pub mod file;
pub mod resolve;

pub use error::{ConfigError, ConfigResult};
pub use file::{ConfigFile, DEFAULT_CONFIG_PATH, FAN_SPEEDS_SECTION, MODE_KEY, MODE_SECTION};
pub use resolve::{Settings, resolve};
