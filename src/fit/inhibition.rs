//! Inhibition constant under the competitive model.
//!
//! A competitive inhibitor raises the apparent Km by a factor `1 + [I]/Ki` and
//! leaves Vmax unchanged, so
//!
//! ```text
//! Ki = [I] / (Km_inhibitor / Km_control - 1)
//! ```

use crate::domain::{FitResult, InhibitionResult, Mechanism};
use crate::error::KineticsError;

pub fn compute_ki(
    control: &FitResult,
    inhibitor: &FitResult,
    inhibitor_concentration: f64,
) -> Result<InhibitionResult, KineticsError> {
    if !(inhibitor_concentration.is_finite() && inhibitor_concentration > 0.0) {
        return Err(KineticsError::InvalidConfig(format!(
            "inhibitor concentration must be finite and > 0, got {inhibitor_concentration}"
        )));
    }
    if !(inhibitor.km > control.km) || control.km <= 0.0 {
        return Err(KineticsError::NonCompetitiveOrInvalidRatio {
            control_km: control.km,
            inhibitor_km: inhibitor.km,
        });
    }

    let ki = inhibitor_concentration / (inhibitor.km / control.km - 1.0);
    if !(ki.is_finite() && ki > 0.0) {
        return Err(KineticsError::NonCompetitiveOrInvalidRatio {
            control_km: control.km,
            inhibitor_km: inhibitor.km,
        });
    }

    Ok(InhibitionResult {
        ki,
        mechanism: Mechanism::Competitive,
        inhibitor_concentration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitQuality;

    fn fit_with_km(km: f64) -> FitResult {
        FitResult {
            vmax: 100.0,
            km,
            r2: 1.0,
            quality: FitQuality {
                sse: 0.0,
                rmse: 0.0,
                n: 6,
                iterations: 5,
            },
        }
    }

    #[test]
    fn doubling_km_at_10um_gives_ki_10() {
        let res = compute_ki(&fit_with_km(20.0), &fit_with_km(40.0), 10.0).unwrap();
        assert!((res.ki - 10.0).abs() < 1e-12);
        assert_eq!(res.mechanism, Mechanism::Competitive);
    }

    #[test]
    fn equal_or_lower_km_is_rejected() {
        for inhibitor_km in [20.0, 15.0] {
            let err = compute_ki(&fit_with_km(20.0), &fit_with_km(inhibitor_km), 10.0).unwrap_err();
            assert_eq!(err.kind(), "NonCompetitiveOrInvalidRatio");
        }
    }

    #[test]
    fn non_positive_concentration_is_rejected() {
        let err = compute_ki(&fit_with_km(20.0), &fit_with_km(40.0), 0.0).unwrap_err();
        assert!(matches!(err, KineticsError::InvalidConfig(_)));
    }
}
