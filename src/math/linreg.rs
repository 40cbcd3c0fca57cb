//! Closed-form simple linear regression.
//!
//! ```text
//! slope     = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²
//! intercept = ȳ - slope·x̄
//! ```
//!
//! Centering before accumulating avoids the cancellation of the raw
//! `n·Σxy - Σx·Σy` form.

/// Fit `y = slope·x + intercept`. Returns `None` when `x` has no spread,
/// fewer than two points are given, or the lengths differ.
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let n = x.len() as f64;
    let x_bar = x.iter().sum::<f64>() / n;
    let y_bar = y.iter().sum::<f64>() / n;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_bar;
        sxy += dx * (yi - y_bar);
        sxx += dx * dx;
    }
    if !(sxx > 0.0) {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = y_bar - slope * x_bar;
    if slope.is_finite() && intercept.is_finite() {
        Some((slope, intercept))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_line_is_recovered() {
        let x = [0.2, 0.1, 0.04, 0.02];
        let y: Vec<f64> = x.iter().map(|v| 0.25 * v + 0.0125).collect();
        let (slope, intercept) = fit_line(&x, &y).unwrap();
        assert!((slope - 0.25).abs() < 1e-12);
        assert!((intercept - 0.0125).abs() < 1e-12);
    }

    #[test]
    fn constant_x_has_no_solution() {
        assert!(fit_line(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(fit_line(&[1.0], &[1.0]).is_none());
    }
}
