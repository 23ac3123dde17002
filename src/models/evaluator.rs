//! Curve evaluation over a strain sweep.
//!
//! Inputs are validated before anything is allocated, and either the complete
//! `CurveSet` is returned or an error is; there are no partial results.

use crate::domain::{CurveSet, SoilInput, StrainRange};
use crate::error::ModelError;
use crate::math::geom_space;
use crate::models::ishibashi_zhang::{
    check_mean_effective_stress, check_plasticity_index, damping_ratio, modulus_ratio,
};

/// Evaluate both curves over the default sweep (`1e-6..=1e-2`, 100 points).
pub fn evaluate_curves(pi: f64, sigma_m: f64) -> Result<CurveSet, ModelError> {
    evaluate_curves_with(&SoilInput::new(pi, sigma_m), &StrainRange::default())
}

/// Evaluate both curves over a caller-defined sweep.
pub fn evaluate_curves_with(input: &SoilInput, range: &StrainRange) -> Result<CurveSet, ModelError> {
    let pi = check_plasticity_index(input.plasticity_index)?;
    let sigma_m = check_mean_effective_stress(input.mean_effective_stress)?;

    let strain = geom_space(range.min, range.max, range.points)?;

    let mut modulus = Vec::with_capacity(strain.len());
    let mut damping = Vec::with_capacity(strain.len());
    for (i, &g) in strain.iter().enumerate() {
        let ratio = modulus_ratio(g, pi, sigma_m).map_err(|e| at_sample(e, i))?;
        let d = damping_ratio(ratio, pi).map_err(|e| at_sample(e, i))?;
        if !d.is_finite() {
            return Err(ModelError::domain(format!(
                "damping ratio is not finite at sample {i} (strain={g:e})"
            )));
        }
        modulus.push(ratio);
        damping.push(d);
    }

    Ok(CurveSet {
        strain,
        modulus_ratio: modulus,
        damping_ratio: damping,
    })
}

/// Tag a numeric-domain error with the sweep index it came from.
fn at_sample(err: ModelError, index: usize) -> ModelError {
    match err {
        ModelError::NumericDomain { context } => {
            ModelError::domain(format!("{context} (sample {index})"))
        }
        other => other,
    }
}
