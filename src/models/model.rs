//! Michaelis-Menten model evaluation.
//!
//! The fitter relies on two primitive operations:
//! - predict `v(S)` given `(Vmax, Km)` (for residuals/plots)
//! - fill a Jacobian row for a given `S` (for the Levenberg-Marquardt step)

/// Michaelis-Menten rate law.
///
/// v = Vmax * [S] / (Km + [S])
#[inline]
pub fn michaelis_menten(s: f64, vmax: f64, km: f64) -> f64 {
    vmax * s / (km + s)
}

/// Fill the Jacobian row `[∂v/∂Vmax, ∂v/∂Km]` at substrate `s`.
///
/// - `∂v/∂Vmax = S / (Km + S)`
/// - `∂v/∂Km = -Vmax·S / (Km + S)²`
pub fn fill_jacobian_row(s: f64, vmax: f64, km: f64, out: &mut [f64; 2]) {
    let denom = km + s;
    out[0] = s / denom;
    out[1] = -vmax * s / (denom * denom);
}

/// Lineweaver-Burk form: `1/V = (Km/Vmax)·(1/S) + 1/Vmax`.
pub fn lineweaver_burk(inv_s: f64, vmax: f64, km: f64) -> f64 {
    (km / vmax) * inv_s + 1.0 / vmax
}
