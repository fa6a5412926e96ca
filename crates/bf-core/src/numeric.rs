use crate::BfError;

/// Floating point type used throughout system
pub type Real = f64;

/// All volumes are annual acre-feet. Inputs are whole acre-feet, so values
/// stay integer-valued and exact in an f64 at basin scale (< 2^53).
///
/// One tolerance pair for comparisons
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-9,
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

/// Round to the nearest whole acre-foot, ties to even.
pub fn round_af(v: Real) -> Real {
    v.round_ties_even()
}

/// Round to the nearest ten acre-feet, ties to even.
/// Compliance-point flows are reported at this resolution.
pub fn round_to_ten(v: Real) -> Real {
    (v / 10.0).round_ties_even() * 10.0
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, BfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(BfError::NonFinite { what, value: v })
    }
}
