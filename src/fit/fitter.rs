//! Nonlinear least-squares fit of the Michaelis-Menten model.
//!
//! Given one condition's `(S_i, V_i)` pairs we minimize
//!
//! ```text
//! SSE(Vmax, Km) = Σ (V_i - Vmax·S_i / (Km + S_i))²
//! ```
//!
//! with Levenberg-Marquardt. Each step solves the damped Gauss-Newton system as
//! a stacked least-squares problem
//!
//! ```text
//! [ J            ]       [ r ]
//! [ √λ·diag(‖J‖) ] δ  ≈  [ 0 ]
//! ```
//!
//! (Marquardt's scaling: damping is proportional to each Jacobian column norm,
//! so `Vmax` and `Km` are damped on their own scales).
//!
//! The fit is deterministic: the same inputs and seed give bit-identical output.

use nalgebra::{DMatrix, DVector};

use crate::domain::{ConditionGroup, InitialGuess, MichaelisMentenFit};
use crate::error::KineticsError;
use crate::math::solve_least_squares;
use crate::models::{fill_jacobian_row, michaelis_menten};

/// Default iteration budget (accepted + rejected steps).
pub const DEFAULT_MAX_ITERATIONS: usize = 200;

const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_UP: f64 = 10.0;
const LAMBDA_DOWN: f64 = 10.0;
/// Past this damping, steps are below machine precision.
const LAMBDA_MAX: f64 = 1e16;

/// Optimizer settings.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Maximum number of step attempts before giving up.
    pub max_iterations: usize,
    /// Relative parameter-step tolerance.
    pub xtol: f64,
    /// Relative SSE-reduction tolerance.
    pub ftol: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            xtol: 1e-10,
            ftol: 1e-12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    StepTolerance,
    SseTolerance,
    ExactFit,
    Stalled,
}

/// Fit `v = Vmax·S/(Km+S)` to one condition, starting from `guess`.
pub fn fit(
    group: &ConditionGroup,
    guess: InitialGuess,
    opts: &FitOptions,
) -> Result<MichaelisMentenFit, KineticsError> {
    let label = group.label();
    let not_converged = |reason: String| KineticsError::FitDidNotConverge {
        condition: label.to_string(),
        reason,
    };

    if !(guess.vmax0.is_finite() && guess.km0.is_finite() && guess.km0 > 0.0) {
        return Err(not_converged(format!(
            "invalid initial guess Vmax0={}, Km0={}",
            guess.vmax0, guess.km0
        )));
    }

    let s = group.substrates();
    let v = group.velocities();
    let n = s.len();
    let s_min = s.iter().copied().fold(f64::INFINITY, f64::min);

    let mut vmax = guess.vmax0;
    let mut km = guess.km0;
    let mut sse = sum_squared_residuals(&s, &v, vmax, km);
    if !sse.is_finite() {
        return Err(not_converged("non-finite SSE at the initial guess".into()));
    }

    let mut lambda = LAMBDA_INIT;
    let mut accepted = 0usize;
    let mut attempts = 0usize;
    let mut stop = None;
    let mut row = [0.0; 2];

    'outer: while attempts < opts.max_iterations {
        // Jacobian of the model and residuals at the current point.
        let mut jac = DMatrix::<f64>::zeros(n + 2, 2);
        let mut rhs = DVector::<f64>::zeros(n + 2);
        for i in 0..n {
            fill_jacobian_row(s[i], vmax, km, &mut row);
            jac[(i, 0)] = row[0];
            jac[(i, 1)] = row[1];
            rhs[i] = v[i] - michaelis_menten(s[i], vmax, km);
        }
        let col_norms = [jac.column(0).norm(), jac.column(1).norm()];

        // Inner loop: raise damping until the step reduces SSE.
        loop {
            if attempts >= opts.max_iterations {
                break 'outer;
            }
            attempts += 1;

            let sqrt_lambda = lambda.sqrt();
            jac[(n, 0)] = sqrt_lambda * col_norms[0];
            jac[(n, 1)] = 0.0;
            jac[(n + 1, 0)] = 0.0;
            jac[(n + 1, 1)] = sqrt_lambda * col_norms[1];

            let candidate = solve_least_squares(&jac, &rhs).and_then(|delta| {
                let vmax_new = vmax + delta[0];
                let km_new = km + delta[1];
                // Km + S must stay positive at every observed S.
                if km_new + s_min <= 0.0 {
                    return None;
                }
                let sse_new = sum_squared_residuals(&s, &v, vmax_new, km_new);
                sse_new.is_finite().then_some((delta[0], delta[1], sse_new))
            });

            match candidate {
                Some((d_vmax, d_km, sse_new)) if sse_new < sse => {
                    let small_step = d_vmax.abs() <= opts.xtol * (vmax.abs() + opts.xtol)
                        && d_km.abs() <= opts.xtol * (km.abs() + opts.xtol);
                    let small_gain = sse - sse_new <= opts.ftol * sse;

                    vmax += d_vmax;
                    km += d_km;
                    sse = sse_new;
                    accepted += 1;
                    lambda = (lambda / LAMBDA_DOWN).max(f64::MIN_POSITIVE);

                    log::trace!(
                        "[{label}] step {accepted}: Vmax={vmax:.6} Km={km:.6} SSE={sse:.6e} lambda={lambda:.1e}"
                    );

                    stop = if sse == 0.0 {
                        Some(Stop::ExactFit)
                    } else if small_step {
                        Some(Stop::StepTolerance)
                    } else if small_gain {
                        Some(Stop::SseTolerance)
                    } else {
                        None
                    };
                    if stop.is_some() {
                        break 'outer;
                    }
                    continue 'outer;
                }
                _ => {
                    lambda *= LAMBDA_UP;
                    if lambda > LAMBDA_MAX {
                        stop = Some(Stop::Stalled);
                        break 'outer;
                    }
                }
            }
        }
    }

    let Some(stop) = stop else {
        log::warn!("[{label}] fit hit the iteration budget ({})", opts.max_iterations);
        return Err(not_converged(format!(
            "iteration budget of {} exhausted (Vmax={vmax:.4}, Km={km:.4})",
            opts.max_iterations
        )));
    };

    if !(vmax.is_finite() && km.is_finite()) {
        return Err(not_converged("non-finite parameters".into()));
    }
    if vmax <= 0.0 || km <= 0.0 {
        return Err(not_converged(format!(
            "physically invalid parameters Vmax={vmax:.4}, Km={km:.4}"
        )));
    }

    log::debug!(
        "[{label}] converged ({stop:?}) after {accepted} accepted / {attempts} attempted steps: Vmax={vmax:.4} Km={km:.4} SSE={sse:.4e}"
    );

    Ok(MichaelisMentenFit {
        condition: label.to_string(),
        vmax,
        km,
        sse,
        iterations: accepted,
    })
}

fn sum_squared_residuals(s: &[f64], v: &[f64], vmax: f64, km: f64) -> f64 {
    s.iter()
        .zip(v)
        .map(|(&si, &vi)| {
            let r = vi - michaelis_menten(si, vmax, km);
            r * r
        })
        .sum()
}
