//! Scalar metrics derived from an evaluated curve set.

use serde::{Deserialize, Serialize};

use crate::domain::CurveSet;
use crate::error::AppError;

/// Modulus ratio at which the reference strain is read.
pub const REFERENCE_MODULUS_RATIO: f64 = 0.5;

/// Headline numbers for a pair of curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSummary {
    /// G/Gmax at the smallest strain.
    pub modulus_ratio_initial: f64,
    /// G/Gmax at the largest strain.
    pub modulus_ratio_final: f64,
    /// Largest G/Gmax on the sweep. Values above 1 are kept as computed.
    pub modulus_ratio_peak: f64,
    pub strain_at_peak: f64,
    /// Strain where G/Gmax first drops through 0.5 (log-linear interpolation).
    ///
    /// `None` if the curve starts below 0.5 or never reaches it.
    pub reference_strain: Option<f64>,
    pub damping_min: f64,
    pub damping_max: f64,
}

/// Compute the summary for a curve set.
pub fn summarize(curves: &CurveSet) -> Result<CurveSummary, AppError> {
    let n = curves.len();
    if n == 0 || curves.modulus_ratio.len() != n || curves.damping_ratio.len() != n {
        return Err(AppError::new(4, "Cannot summarize an empty or ragged curve set."));
    }

    let g = &curves.modulus_ratio;
    let mut peak = 0usize;
    for i in 1..n {
        if g[i] > g[peak] {
            peak = i;
        }
    }

    let (mut d_min, mut d_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &d in &curves.damping_ratio {
        d_min = d_min.min(d);
        d_max = d_max.max(d);
    }

    Ok(CurveSummary {
        modulus_ratio_initial: g[0],
        modulus_ratio_final: g[n - 1],
        modulus_ratio_peak: g[peak],
        strain_at_peak: curves.strain[peak],
        reference_strain: crossing_strain(&curves.strain, g, REFERENCE_MODULUS_RATIO),
        damping_min: d_min,
        damping_max: d_max,
    })
}

fn crossing_strain(strain: &[f64], ratio: &[f64], level: f64) -> Option<f64> {
    for i in 0..ratio.len().saturating_sub(1) {
        let (g0, g1) = (ratio[i], ratio[i + 1]);
        if g0 >= level && g1 < level {
            let (l0, l1) = (strain[i].ln(), strain[i + 1].ln());
            let u = (g0 - level) / (g0 - g1);
            return Some((l0 + u * (l1 - l0)).exp());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluate_curves;

    #[test]
    fn reference_strain_of_sand_at_unit_stress() {
        // σm = 1 gives G/Gmax = K, and K = 0.5 exactly at γ = 0.000102 for PI = 0.
        let curves = evaluate_curves(0.0, 1.0).unwrap();
        let s = summarize(&curves).unwrap();
        let gamma = s.reference_strain.unwrap();
        assert!((gamma - 1.02e-4).abs() / 1.02e-4 < 0.02, "gamma_ref={gamma}");
        assert_eq!(s.strain_at_peak, 1e-6);
        assert_eq!(s.modulus_ratio_peak, s.modulus_ratio_initial);
    }

    #[test]
    fn peak_above_initial_is_reported_unclamped() {
        let curves = evaluate_curves(0.0, 100.0).unwrap();
        let s = summarize(&curves).unwrap();
        assert!(s.modulus_ratio_peak > 1.0);
        assert!(s.modulus_ratio_peak > s.modulus_ratio_initial);
        assert!(s.strain_at_peak > 1e-6);
        assert!(s.damping_max > s.damping_min);
    }

    #[test]
    fn no_crossing_when_curve_stays_above_level() {
        let curves = CurveSet {
            strain: vec![1e-6, 1e-5, 1e-4],
            modulus_ratio: vec![1.0, 0.9, 0.8],
            damping_ratio: vec![0.01, 0.02, 0.03],
        };
        assert_eq!(summarize(&curves).unwrap().reference_strain, None);
    }

    #[test]
    fn empty_curve_set_is_rejected() {
        let curves = CurveSet {
            strain: vec![],
            modulus_ratio: vec![],
            damping_ratio: vec![],
        };
        assert!(summarize(&curves).is_err());
    }
}
