//! Reference and synthetic kinetics datasets.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{CONTROL, INHIBITOR, Measurement};
use crate::error::KineticsError;
use crate::models::michaelis_menten;

/// Substrate series used by the reference dataset (µM).
pub const REFERENCE_SUBSTRATES: [f64; 6] = [5.0, 10.0, 25.0, 50.0, 100.0, 200.0];

const REFERENCE_CONTROL_V: [f64; 6] = [18.0, 30.0, 52.0, 68.0, 80.0, 89.0];
const REFERENCE_INHIBITOR_V: [f64; 6] = [7.0, 13.0, 28.0, 45.0, 62.0, 75.0];

/// Reference two-condition dataset (an ACE assay with a competitive inhibitor).
pub fn demo_measurements() -> Vec<Measurement> {
    let control = REFERENCE_SUBSTRATES
        .iter()
        .zip(REFERENCE_CONTROL_V)
        .map(|(&s, v)| Measurement::new(s, v, CONTROL));
    let inhibitor = REFERENCE_SUBSTRATES
        .iter()
        .zip(REFERENCE_INHIBITOR_V)
        .map(|(&s, v)| Measurement::new(s, v, INHIBITOR));
    control.chain(inhibitor).collect()
}

/// Parameters for synthetic data generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub vmax: f64,
    /// True (uninhibited) Km.
    pub km: f64,
    pub ki: f64,
    pub inhibitor_concentration: f64,
    pub substrates: Vec<f64>,
    /// Replicates per substrate concentration.
    pub replicates: usize,
    /// Relative Gaussian noise (0.05 = 5% of the true velocity).
    pub noise_rel: f64,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            vmax: 100.0,
            km: 20.0,
            ki: 10.0,
            inhibitor_concentration: 10.0,
            substrates: REFERENCE_SUBSTRATES.to_vec(),
            replicates: 1,
            noise_rel: 0.03,
            seed: 42,
        }
    }
}

impl SampleConfig {
    /// Apparent Km under competitive inhibition: `Km·(1 + [I]/Ki)`.
    pub fn apparent_km(&self) -> f64 {
        self.km * (1.0 + self.inhibitor_concentration / self.ki)
    }
}

/// Generate Control and Inhibitor measurements from a competitive-inhibition model.
///
/// The same seed always yields the same dataset.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<Measurement>, KineticsError> {
    for (name, value) in [
        ("vmax", config.vmax),
        ("km", config.km),
        ("ki", config.ki),
        ("inhibitor concentration", config.inhibitor_concentration),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(KineticsError::InvalidConfig(format!(
                "sample {name} must be finite and > 0, got {value}"
            )));
        }
    }
    if !(config.noise_rel.is_finite() && config.noise_rel >= 0.0) {
        return Err(KineticsError::InvalidConfig(format!(
            "sample noise must be finite and >= 0, got {}",
            config.noise_rel
        )));
    }
    if config.replicates == 0 {
        return Err(KineticsError::InvalidConfig("sample replicates must be > 0".into()));
    }
    if config.substrates.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
        return Err(KineticsError::InvalidConfig(
            "sample substrate concentrations must be finite and > 0".into(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| KineticsError::InvalidConfig(format!("noise distribution error: {e}")))?;

    let km_app = config.apparent_km();
    let mut out = Vec::with_capacity(2 * config.substrates.len() * config.replicates);
    for (label, km) in [(CONTROL, config.km), (INHIBITOR, km_app)] {
        for &s in &config.substrates {
            for _ in 0..config.replicates {
                let v_true = michaelis_menten(s, config.vmax, km);
                let z: f64 = normal.sample(&mut rng);
                // Clamp so the record stays valid for the reciprocal transform.
                let v = (v_true * (1.0 + config.noise_rel * z)).max(v_true * 1e-3);
                out.push(Measurement::new(s, v, label));
            }
        }
    }

    log::debug!(
        "generated {} synthetic measurements (seed={}, Km_app={km_app:.3})",
        out.len(),
        config.seed
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_has_both_conditions() {
        let data = demo_measurements();
        assert_eq!(data.len(), 12);
        assert_eq!(data.iter().filter(|m| m.condition == CONTROL).count(), 6);
        assert_eq!(data[6], Measurement::new(5.0, 7.0, INHIBITOR));
    }

    #[test]
    fn same_seed_same_sample() {
        let cfg = SampleConfig::default();
        assert_eq!(generate_sample(&cfg).unwrap(), generate_sample(&cfg).unwrap());

        let other = SampleConfig { seed: 7, ..cfg.clone() };
        assert_ne!(generate_sample(&cfg).unwrap(), generate_sample(&other).unwrap());
    }

    #[test]
    fn noiseless_sample_follows_apparent_km() {
        let cfg = SampleConfig {
            noise_rel: 0.0,
            ..SampleConfig::default()
        };
        assert!((cfg.apparent_km() - 40.0).abs() < 1e-12);
        let data = generate_sample(&cfg).unwrap();
        for m in &data {
            let km = if m.condition == CONTROL { 20.0 } else { 40.0 };
            assert!((m.velocity - michaelis_menten(m.substrate, 100.0, km)).abs() < 1e-12);
        }
    }

    #[test]
    fn rejects_invalid_config() {
        let cfg = SampleConfig {
            ki: 0.0,
            ..SampleConfig::default()
        };
        assert_eq!(generate_sample(&cfg).unwrap_err().kind(), "InvalidConfig");
    }
}
