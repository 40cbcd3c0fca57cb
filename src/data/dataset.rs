//! Grouping of raw measurements by condition label.
//!
//! This is the only place input is validated. Everything downstream can assume
//! a `ConditionGroup` has at least two distinct, strictly positive substrate
//! concentrations and finite, non-negative velocities.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{ConditionGroup, Measurement};
use crate::error::KineticsError;

/// Minimum measurements per condition (two parameters are fitted).
pub const MIN_POINTS_PER_CONDITION: usize = 2;

/// Partition measurements by condition label.
///
/// Record order inside each group follows the input order; groups are keyed
/// (and iterated) by label.
pub fn group_by_condition(
    measurements: &[Measurement],
) -> Result<BTreeMap<String, ConditionGroup>, KineticsError> {
    if measurements.is_empty() {
        return Err(KineticsError::invalid_dataset(None, "no measurements"));
    }

    let mut groups: BTreeMap<String, ConditionGroup> = BTreeMap::new();
    for (i, m) in measurements.iter().enumerate() {
        if m.condition.trim().is_empty() {
            return Err(KineticsError::invalid_dataset(
                None,
                format!("measurement #{i} has an empty condition label"),
            ));
        }
        groups
            .entry(m.condition.clone())
            .or_insert_with(|| ConditionGroup {
                label: m.condition.clone(),
                measurements: Vec::new(),
            })
            .measurements
            .push(m.clone());
    }

    for group in groups.values() {
        validate_group(group)?;
    }

    log::debug!(
        "grouped {} measurements into {} condition(s): {:?}",
        measurements.len(),
        groups.len(),
        groups.keys().collect::<Vec<_>>()
    );
    Ok(groups)
}

fn validate_group(group: &ConditionGroup) -> Result<(), KineticsError> {
    let label = Some(group.label());

    if group.len() < MIN_POINTS_PER_CONDITION {
        return Err(KineticsError::invalid_dataset(
            label,
            format!(
                "{} measurement(s), need at least {MIN_POINTS_PER_CONDITION}",
                group.len()
            ),
        ));
    }

    for m in group.measurements() {
        if !(m.substrate.is_finite() && m.substrate > 0.0) {
            return Err(KineticsError::invalid_dataset(
                label,
                format!("substrate concentration must be > 0, got {}", m.substrate),
            ));
        }
        if !(m.velocity.is_finite() && m.velocity >= 0.0) {
            return Err(KineticsError::invalid_dataset(
                label,
                format!("velocity must be finite and >= 0, got {}", m.velocity),
            ));
        }
    }

    let distinct: BTreeSet<u64> = group.measurements().iter().map(|m| m.substrate.to_bits()).collect();
    if distinct.len() < 2 {
        return Err(KineticsError::invalid_dataset(
            label,
            "need at least 2 distinct substrate concentrations",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CONTROL, INHIBITOR};

    fn m(s: f64, v: f64, c: &str) -> Measurement {
        Measurement::new(s, v, c)
    }

    #[test]
    fn partitions_and_preserves_records() {
        let data = vec![
            m(5.0, 18.0, CONTROL),
            m(5.0, 7.0, INHIBITOR),
            m(10.0, 30.0, CONTROL),
            m(10.0, 13.0, INHIBITOR),
        ];
        let groups = group_by_condition(&data).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[CONTROL].velocities(), vec![18.0, 30.0]);
        assert_eq!(groups[INHIBITOR].substrates(), vec![5.0, 10.0]);
        let total: usize = groups.values().map(|g| g.len()).sum();
        assert_eq!(total, data.len());
    }

    #[test]
    fn rejects_zero_substrate() {
        let data = vec![m(0.0, 1.0, CONTROL), m(10.0, 30.0, CONTROL)];
        let err = group_by_condition(&data).unwrap_err();
        assert_eq!(err.kind(), "InvalidDataset");
        assert_eq!(err.condition(), Some(CONTROL));
    }

    #[test]
    fn rejects_single_point_group() {
        let data = vec![m(5.0, 18.0, CONTROL), m(10.0, 30.0, CONTROL), m(5.0, 7.0, INHIBITOR)];
        let err = group_by_condition(&data).unwrap_err();
        assert_eq!(err.condition(), Some(INHIBITOR));
    }

    #[test]
    fn rejects_repeated_single_concentration() {
        let data = vec![m(5.0, 18.0, CONTROL), m(5.0, 19.0, CONTROL)];
        assert!(matches!(
            group_by_condition(&data),
            Err(KineticsError::InvalidDataset { .. })
        ));
    }

    #[test]
    fn rejects_empty_input_and_negative_velocity() {
        assert!(group_by_condition(&[]).is_err());
        let data = vec![m(5.0, -1.0, CONTROL), m(10.0, 30.0, CONTROL)];
        assert!(group_by_condition(&data).is_err());
    }

    #[test]
    fn tolerates_any_number_of_labels() {
        let data = vec![
            m(5.0, 1.0, "A"),
            m(10.0, 2.0, "A"),
            m(5.0, 1.0, "B"),
            m(10.0, 2.0, "B"),
            m(5.0, 1.0, "C"),
            m(10.0, 2.0, "C"),
        ];
        assert_eq!(group_by_condition(&data).unwrap().len(), 3);
    }
}
