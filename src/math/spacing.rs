//! Log-spaced sample generation for the strain sweep.

use crate::error::ModelError;

/// Generate `steps` geometrically spaced points between `min` and `max` (inclusive).
///
/// Interior points are `exp(ln(min) + i·Δ)`; the first and last elements are set
/// to exactly `min` and `max` so the sweep bounds survive the `ln`/`exp` round trip.
pub fn geom_space(min: f64, max: f64, steps: usize) -> Result<Vec<f64>, ModelError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(ModelError::domain(format!(
            "strain range [{min}, {max}] must be finite"
        )));
    }
    if min <= 0.0 {
        return Err(ModelError::domain(format!("strain min={min} must be > 0")));
    }
    if max <= min {
        return Err(ModelError::domain(format!(
            "strain max={max} must be greater than min={min}"
        )));
    }
    if steps < 2 {
        return Err(ModelError::domain(format!("strain points={steps} must be >= 2")));
    }

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out = Vec::with_capacity(steps);
    out.push(min);
    for i in 1..steps - 1 {
        out.push((ln_min + step * i as f64).exp());
    }
    out.push(max);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geom_space_includes_exact_endpoints() {
        let v = geom_space(1e-6, 1e-2, 100).unwrap();
        assert_eq!(v.len(), 100);
        assert_eq!(v[0], 1e-6);
        assert_eq!(v[99], 1e-2);
    }

    #[test]
    fn geom_space_is_strictly_increasing_with_constant_ratio() {
        let v = geom_space(1e-6, 1e-2, 5).unwrap();
        for w in v.windows(2) {
            assert!(w[1] > w[0]);
            assert!((w[1] / w[0] - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn geom_space_rejects_non_positive_or_inverted_ranges() {
        assert!(matches!(geom_space(0.0, 1e-2, 10), Err(ModelError::NumericDomain { .. })));
        assert!(matches!(geom_space(-1e-6, 1e-2, 10), Err(ModelError::NumericDomain { .. })));
        assert!(geom_space(1e-2, 1e-6, 10).is_err());
        assert!(geom_space(1e-6, f64::INFINITY, 10).is_err());
        assert!(geom_space(1e-6, 1e-2, 1).is_err());
    }
}
