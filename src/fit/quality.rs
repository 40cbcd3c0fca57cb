//! Goodness of fit.
//!
//! `R² = 1 - SS_res / SS_tot` with
//! - `SS_res = Σ (y_i - ŷ_i)²`
//! - `SS_tot = Σ (y_i - ȳ)²`

use crate::domain::{ConditionGroup, FitQuality, FitResult, MichaelisMentenFit};
use crate::error::KineticsError;

/// Coefficient of determination of `predicted` against `observed`.
pub fn r_squared(observed: &[f64], predicted: &[f64]) -> Result<f64, KineticsError> {
    if observed.len() != predicted.len() {
        return Err(KineticsError::LengthMismatch {
            observed: observed.len(),
            predicted: predicted.len(),
        });
    }
    if observed.is_empty() {
        return Err(KineticsError::DegenerateData("no observations to score".into()));
    }

    let mean = observed.iter().sum::<f64>() / observed.len() as f64;
    let ss_tot: f64 = observed.iter().map(|y| (y - mean) * (y - mean)).sum();
    if ss_tot == 0.0 {
        return Err(KineticsError::DegenerateData(
            "all observed values are identical (zero total variance)".into(),
        ));
    }
    let ss_res: f64 = observed
        .iter()
        .zip(predicted)
        .map(|(y, y_hat)| (y - y_hat) * (y - y_hat))
        .sum();

    Ok(1.0 - ss_res / ss_tot)
}

/// Score a converged fit against its own data and build the reported `FitResult`.
pub fn fit_quality(group: &ConditionGroup, fit: &MichaelisMentenFit) -> Result<FitResult, KineticsError> {
    let observed = group.velocities();
    let predicted: Vec<f64> = group.substrates().iter().map(|&s| fit.predict(s)).collect();
    let r2 = r_squared(&observed, &predicted).map_err(|e| e.in_condition(group.label()))?;

    let n = observed.len();
    let sse: f64 = observed
        .iter()
        .zip(&predicted)
        .map(|(y, y_hat)| (y - y_hat) * (y - y_hat))
        .sum();

    Ok(FitResult {
        vmax: fit.vmax,
        km: fit.km,
        r2,
        quality: FitQuality {
            sse,
            rmse: (sse / n as f64).sqrt(),
            n,
            iterations: fit.iterations,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_prediction_scores_one() {
        let y = [1.0, 2.0, 4.0, 8.0];
        assert!((r_squared(&y, &y).unwrap() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn mean_prediction_scores_zero() {
        let y = [1.0, 2.0, 3.0];
        assert!(r_squared(&y, &[2.0, 2.0, 2.0]).unwrap().abs() < 1e-15);
    }

    #[test]
    fn invariant_to_uniform_scaling() {
        let y = [18.0, 30.0, 52.0, 68.0, 80.0, 89.0];
        let y_hat = [17.1, 31.2, 51.0, 69.3, 79.4, 89.9];
        let base = r_squared(&y, &y_hat).unwrap();
        for k in [0.001, 2.5, 1e4] {
            let ys: Vec<f64> = y.iter().map(|v| v * k).collect();
            let yhs: Vec<f64> = y_hat.iter().map(|v| v * k).collect();
            assert!((r_squared(&ys, &yhs).unwrap() - base).abs() < 1e-12);
        }
    }

    #[test]
    fn length_mismatch_and_degenerate_data() {
        assert!(matches!(
            r_squared(&[1.0, 2.0], &[1.0]),
            Err(KineticsError::LengthMismatch { observed: 2, predicted: 1 })
        ));
        assert!(matches!(
            r_squared(&[3.0, 3.0, 3.0], &[3.0, 3.0, 3.0]),
            Err(KineticsError::DegenerateData(_))
        ));
    }
}
