use crate::LcError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, LcError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(LcError::NonFinite { what, value: v })
    }
}

pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, LcError> {
    if !v.is_finite() || v <= 0.0 {
        Err(LcError::InvalidArg { what })
    } else {
        Ok(v)
    }
}

/// Wrap a fractional position into [0, 1).
///
/// Used for carrier progress along the closed loop; the result is
/// non-negative for any finite input, including large negative deltas.
pub fn wrap_unit(x: Real) -> Real {
    let w = x.rem_euclid(1.0);
    // rem_euclid(1.0) can return exactly 1.0 when x is a tiny negative value
    if w >= 1.0 { 0.0 } else { w }
}
