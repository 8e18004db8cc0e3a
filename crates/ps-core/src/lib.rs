//! ps-core: stable foundation for the piStor fan controller.
//!
//! Contains:
//! - table (breakpoint tables with piecewise-constant lookup)
//! - numeric (Real, finiteness checks, the normalized fan fraction)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod table;

pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use table::BreakpointTable;
