//! Lineweaver-Burk diagnostic.
//!
//! Reciprocal transform `(S, V) -> (1/S, 1/V)` followed by an ordinary
//! least-squares line. For ideal Michaelis-Menten data:
//!
//! ```text
//! 1/V = (Km/Vmax)·(1/S) + 1/Vmax
//! ```
//!
//! The reciprocal transform distorts the error structure (small velocities
//! dominate), so this line is only ever a visual cross-check. Reported Vmax/Km
//! come from the nonlinear fit.

use crate::domain::{ConditionGroup, LinearFit};
use crate::error::KineticsError;
use crate::math::fit_line;

/// Fit the reciprocal-space line for one condition.
pub fn linearize(group: &ConditionGroup) -> Result<LinearFit, KineticsError> {
    let mut points = Vec::with_capacity(group.len());
    for m in group.measurements() {
        if m.velocity == 0.0 {
            return Err(KineticsError::DivisionByZero {
                condition: group.label().to_string(),
                substrate: m.substrate,
            });
        }
        points.push((1.0 / m.substrate, 1.0 / m.velocity));
    }

    let (x, y): (Vec<f64>, Vec<f64>) = points.iter().copied().unzip();
    let (slope, intercept) = fit_line(&x, &y).ok_or_else(|| {
        KineticsError::DegenerateData("reciprocal substrate values have no spread".into())
            .in_condition(group.label())
    })?;

    Ok(LinearFit {
        slope,
        intercept,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{REFERENCE_SUBSTRATES, group_by_condition};
    use crate::domain::{CONTROL, Measurement};
    use crate::models::michaelis_menten;

    fn group_of(points: Vec<(f64, f64)>) -> ConditionGroup {
        let data: Vec<Measurement> = points
            .into_iter()
            .map(|(s, v)| Measurement::new(s, v, CONTROL))
            .collect();
        group_by_condition(&data).unwrap().remove(CONTROL).unwrap()
    }

    #[test]
    fn lineweaver_burk_identity_on_noiseless_data() {
        let (vmax, km) = (100.0, 20.0);
        let group = group_of(
            REFERENCE_SUBSTRATES
                .iter()
                .map(|&s| (s, michaelis_menten(s, vmax, km)))
                .collect(),
        );
        let lf = linearize(&group).unwrap();
        assert!(((lf.slope - km / vmax) / (km / vmax)).abs() < 1e-3);
        assert!(((lf.intercept - 1.0 / vmax) * vmax).abs() < 1e-3);
        assert!((lf.x_intercept() + 1.0 / km).abs() < 1e-6);
        assert_eq!(lf.points().len(), REFERENCE_SUBSTRATES.len());
    }

    #[test]
    fn zero_velocity_is_division_by_zero() {
        let group = group_of(vec![(5.0, 0.0), (10.0, 30.0)]);
        let err = linearize(&group).unwrap_err();
        assert!(matches!(err, KineticsError::DivisionByZero { substrate, .. } if substrate == 5.0));
        assert_eq!(err.condition(), Some(CONTROL));
    }
}
