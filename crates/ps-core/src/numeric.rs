use crate::{CoreError, CoreResult};

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Normalized fan duty cycle in `[0, 1]`.
///
/// Construction rejects anything outside the unit interval instead of
/// clamping it; callers that want saturation must do it explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct FanFraction(Real);

impl FanFraction {
    pub const OFF: Self = Self(0.0);
    pub const FULL: Self = Self(1.0);

    pub fn new(value: Real) -> CoreResult<Self> {
        let value = ensure_finite(value, "fan fraction")?;
        if !(0.0..=1.0).contains(&value) {
            return Err(CoreError::InvalidArg {
                what: "fan fraction must be within [0, 1]",
            });
        }
        Ok(Self(value))
    }

    /// Saturate `value` into `[0, 1]`. NaN saturates to full speed.
    pub fn saturating(value: Real) -> Self {
        if value.is_nan() {
            Self::FULL
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// Convert a speed percentage (0-100) into a fraction.
    pub fn from_percent(percent: i64) -> CoreResult<Self> {
        Self::new(percent as Real / 100.0)
    }

    pub fn value(self) -> Real {
        self.0
    }
}

impl From<FanFraction> for Real {
    fn from(f: FanFraction) -> Self {
        f.0
    }
}
