//! Ishibashi–Zhang (1993) closed-form expressions.
//!
//! ```text
//! G/Gmax(γ) = K(γ, PI) · σm^(m(γ, PI) − m0)
//!
//! m(γ, PI) − m0 = 0.272 · [1 − tanh(ln((0.000556 / γ)^0.4))] · exp(−0.0145 · PI^1.3)
//! K(γ, PI)      = 0.5 · [1 + tanh(ln(((0.000102 + n(PI)) / γ)^0.492))]
//!
//! D = 0.333 · (1 + exp(−0.0145 · PI^1.3)) · 0.5 · (0.586 · (G/Gmax)² − 1.547 · (G/Gmax) + 1)
//! ```
//!
//! Every function validates its own arguments so each one is usable on its own;
//! the curve evaluator validates once up front and then calls these per sample.

use crate::error::ModelError;

const M_AMPLITUDE: f64 = 0.272;
const M_REFERENCE_STRAIN: f64 = 0.000556;
const M_EXPONENT: f64 = 0.4;

const K_REFERENCE_STRAIN: f64 = 0.000102;
const K_EXPONENT: f64 = 0.492;

const PI_DECAY: f64 = 0.0145;
const PI_DECAY_EXPONENT: f64 = 1.3;

const DAMPING_SCALE: f64 = 0.333;
const DAMPING_C2: f64 = 0.586;
const DAMPING_C1: f64 = 1.547;

/// Validate a plasticity index: finite and `>= 0`.
pub fn check_plasticity_index(pi: f64) -> Result<f64, ModelError> {
    if !pi.is_finite() {
        return Err(ModelError::invalid("PI", pi, "must be finite"));
    }
    if pi < 0.0 {
        return Err(ModelError::invalid("PI", pi, "must be >= 0"));
    }
    Ok(pi)
}

/// Validate a mean effective stress: finite and `> 0` (kPa).
pub fn check_mean_effective_stress(sigma_m: f64) -> Result<f64, ModelError> {
    if !sigma_m.is_finite() {
        return Err(ModelError::invalid("sigma_m", sigma_m, "must be finite"));
    }
    if sigma_m <= 0.0 {
        return Err(ModelError::invalid("sigma_m", sigma_m, "must be > 0 kPa"));
    }
    Ok(sigma_m)
}

fn check_strain(strain: f64) -> Result<f64, ModelError> {
    if !(strain.is_finite() && strain > 0.0) {
        return Err(ModelError::domain(format!(
            "strain={strain} must be finite and > 0"
        )));
    }
    Ok(strain)
}

fn check_finite(value: f64, what: &str, strain: f64) -> Result<f64, ModelError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::domain(format!(
            "{what} is not finite ({value}) at strain={strain:e}"
        )))
    }
}

/// `exp(−0.0145 · PI^1.3)`, shared by `m(γ) − m0` and the damping prefactor.
fn plasticity_decay(pi: f64) -> f64 {
    (-PI_DECAY * pi.powf(PI_DECAY_EXPONENT)).exp()
}

/// Piecewise plasticity coefficient `n(PI)`.
///
/// Brackets are closed on their upper end: `PI = 15` and `PI = 70` use the
/// lower bracket's formula.
pub fn plasticity_coefficient(pi: f64) -> Result<f64, ModelError> {
    let pi = check_plasticity_index(pi)?;
    let n = if pi == 0.0 {
        0.0
    } else if pi <= 15.0 {
        3.37e-6 * pi.powf(1.404)
    } else if pi <= 70.0 {
        7.0e-7 * pi.powf(1.976)
    } else {
        2.7e-5 * pi.powf(1.115)
    };
    Ok(n)
}

/// Stress exponent `m(γ) − m0`.
pub fn exponent_m(strain: f64, pi: f64) -> Result<f64, ModelError> {
    let strain = check_strain(strain)?;
    let pi = check_plasticity_index(pi)?;

    let shape = 1.0 - (M_REFERENCE_STRAIN / strain).powf(M_EXPONENT).ln().tanh();
    Ok(M_AMPLITUDE * shape * plasticity_decay(pi))
}

/// Strain coefficient `K(γ)`.
pub fn coefficient_k(strain: f64, pi: f64) -> Result<f64, ModelError> {
    let strain = check_strain(strain)?;
    let n = plasticity_coefficient(pi)?;

    let arg = ((K_REFERENCE_STRAIN + n) / strain).powf(K_EXPONENT).ln();
    Ok(0.5 * (1.0 + arg.tanh()))
}

/// Modulus reduction `G/Gmax = K(γ) · σm^(m(γ) − m0)`.
pub fn modulus_ratio(strain: f64, pi: f64, sigma_m: f64) -> Result<f64, ModelError> {
    let sigma_m = check_mean_effective_stress(sigma_m)?;
    let k = coefficient_k(strain, pi)?;
    let m = exponent_m(strain, pi)?;
    check_finite(k * sigma_m.powf(m), "G/Gmax", strain)
}

/// Damping ratio as a polynomial transform of the modulus ratio.
///
/// `D` depends on `σm` only through `modulus_ratio`.
pub fn damping_ratio(modulus_ratio: f64, pi: f64) -> Result<f64, ModelError> {
    let pi = check_plasticity_index(pi)?;
    if !modulus_ratio.is_finite() {
        return Err(ModelError::domain(format!(
            "G/Gmax={modulus_ratio} must be finite"
        )));
    }

    let g = modulus_ratio;
    let poly = DAMPING_C2 * g * g - DAMPING_C1 * g + 1.0;
    Ok(DAMPING_SCALE * (1.0 + plasticity_decay(pi)) * 0.5 * poly)
}

/// Every intermediate quantity at one strain sample (for diagnostics).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleTerms {
    pub strain: f64,
    pub n: f64,
    pub m: f64,
    pub k: f64,
    pub stress_factor: f64,
    pub modulus_ratio: f64,
    pub damping_ratio: f64,
}

/// Evaluate and keep all intermediates at a single strain.
pub fn sample_terms(strain: f64, pi: f64, sigma_m: f64) -> Result<SampleTerms, ModelError> {
    let sigma_m = check_mean_effective_stress(sigma_m)?;
    let n = plasticity_coefficient(pi)?;
    let m = exponent_m(strain, pi)?;
    let k = coefficient_k(strain, pi)?;
    let stress_factor = sigma_m.powf(m);
    let g = check_finite(k * stress_factor, "G/Gmax", strain)?;
    let d = check_finite(damping_ratio(g, pi)?, "damping ratio", strain)?;
    Ok(SampleTerms {
        strain,
        n,
        m,
        k,
        stress_factor,
        modulus_ratio: g,
        damping_ratio: d,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel_gap(a: f64, b: f64) -> f64 {
        (a - b).abs() / a.abs().max(b.abs())
    }

    #[test]
    fn plasticity_coefficient_is_zero_for_sand() {
        assert_eq!(plasticity_coefficient(0.0).unwrap(), 0.0);
    }

    #[test]
    fn plasticity_coefficient_bracket_values() {
        let n10 = plasticity_coefficient(10.0).unwrap();
        assert!((n10 - 3.37e-6 * 10f64.powf(1.404)).abs() < 1e-18);

        // Upper bounds are inclusive.
        let n15 = plasticity_coefficient(15.0).unwrap();
        assert!((n15 - 3.37e-6 * 15f64.powf(1.404)).abs() < 1e-18);
        let n70 = plasticity_coefficient(70.0).unwrap();
        assert!((n70 - 7.0e-7 * 70f64.powf(1.976)).abs() < 1e-18);

        let n100 = plasticity_coefficient(100.0).unwrap();
        assert!((n100 - 2.7e-5 * 100f64.powf(1.115)).abs() < 1e-15);
    }

    #[test]
    fn plasticity_coefficient_is_nearly_continuous_at_bracket_edges() {
        for edge in [15.0, 70.0] {
            let below = plasticity_coefficient(edge - 1e-9).unwrap();
            let at = plasticity_coefficient(edge).unwrap();
            let above = plasticity_coefficient(edge + 1e-9).unwrap();
            assert!(rel_gap(below, at) < 1e-6);
            assert!(rel_gap(at, above) < 0.05, "edge {edge}: {at} vs {above}");
        }
    }

    #[test]
    fn negative_or_nan_pi_is_invalid_input() {
        assert!(matches!(
            plasticity_coefficient(-1.0),
            Err(ModelError::InvalidInput { field: "PI", .. })
        ));
        assert!(matches!(
            plasticity_coefficient(f64::NAN),
            Err(ModelError::InvalidInput { .. })
        ));
        assert!(exponent_m(1e-4, -0.5).is_err());
        assert!(damping_ratio(0.5, -3.0).is_err());
    }

    #[test]
    fn exponent_and_coefficient_at_reference_strains() {
        // At γ = 0.000556 the tanh argument is ln(1) = 0.
        let m = exponent_m(M_REFERENCE_STRAIN, 0.0).unwrap();
        assert!((m - 0.272).abs() < 1e-12);

        // At γ = 0.000102 + n(PI) the K argument is ln(1) = 0.
        let k = coefficient_k(K_REFERENCE_STRAIN, 0.0).unwrap();
        assert!((k - 0.5).abs() < 1e-12);
    }

    #[test]
    fn non_positive_strain_is_a_domain_error() {
        assert!(matches!(exponent_m(0.0, 10.0), Err(ModelError::NumericDomain { .. })));
        assert!(matches!(coefficient_k(-1e-4, 10.0), Err(ModelError::NumericDomain { .. })));
        assert!(matches!(modulus_ratio(f64::NAN, 10.0, 100.0), Err(ModelError::NumericDomain { .. })));
    }

    #[test]
    fn zero_or_negative_stress_is_invalid_input() {
        assert!(matches!(
            modulus_ratio(1e-4, 10.0, 0.0),
            Err(ModelError::InvalidInput { field: "sigma_m", .. })
        ));
        assert!(modulus_ratio(1e-4, 10.0, -50.0).is_err());
    }

    #[test]
    fn unit_stress_reduces_modulus_ratio_to_k() {
        for &g in &[1e-6, 1e-4, 1e-2] {
            let k = coefficient_k(g, 30.0).unwrap();
            let r = modulus_ratio(g, 30.0, 1.0).unwrap();
            assert_eq!(k, r);
        }
    }

    #[test]
    fn damping_polynomial_at_unit_modulus_ratio() {
        // PI = 0: prefactor 0.333 · 2 · 0.5; polynomial 0.586 − 1.547 + 1 = 0.039.
        let d = damping_ratio(1.0, 0.0).unwrap();
        assert!((d - 0.333 * 0.039).abs() < 1e-12);
    }

    #[test]
    fn damping_grows_as_modulus_degrades() {
        let low = damping_ratio(0.95, 20.0).unwrap();
        let high = damping_ratio(0.2, 20.0).unwrap();
        assert!(high > low);
    }

    #[test]
    fn sample_terms_agree_with_individual_functions() {
        let t = sample_terms(2e-4, 25.0, 80.0).unwrap();
        assert_eq!(t.modulus_ratio, modulus_ratio(2e-4, 25.0, 80.0).unwrap());
        assert_eq!(t.damping_ratio, damping_ratio(t.modulus_ratio, 25.0).unwrap());
        assert_eq!(t.n, plasticity_coefficient(25.0).unwrap());
    }
}
