//! Approximate equality for tolerance-checked numeric invariants

/// Relative tolerance used by invariant checks throughout the workspace.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Compares two values with a relative tolerance, falling back to an
/// absolute comparison when both magnitudes are near zero.
pub fn approx_eq_tol(a: f64, b: f64, tolerance: f64) -> bool {
    let diff = (a - b).abs();
    let floor = a.abs().min(b.abs());
    if floor > tolerance {
        diff / floor <= tolerance
    } else {
        diff <= tolerance
    }
}

/// [`approx_eq_tol`] with [`DEFAULT_TOLERANCE`].
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_eq_tol(a, b, DEFAULT_TOLERANCE)
}
