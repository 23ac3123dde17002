//! Shared "evaluate pipeline" logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> classify -> evaluate curves -> summarize
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{CurveSet, SoilClass, SoilInput, StrainRange};
use crate::error::AppError;
use crate::models::{evaluate_curves_with, plasticity_coefficient};
use crate::report::{CurveSummary, summarize};

/// All computed outputs of a single evaluation.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: SoilInput,
    pub soil_class: SoilClass,
    /// `n(PI)`.
    pub plasticity_coefficient: f64,
    pub range: StrainRange,
    pub curves: CurveSet,
    pub summary: CurveSummary,
}

/// Execute the evaluation pipeline and return the computed outputs.
pub fn run_eval(input: &SoilInput, range: &StrainRange) -> Result<RunOutput, AppError> {
    // Evaluating first validates PI and σm, so classification below only sees
    // in-domain values.
    let curves = evaluate_curves_with(input, range)?;
    let n = plasticity_coefficient(input.plasticity_index)?;
    let soil_class = SoilClass::from_plasticity_index(input.plasticity_index);
    let summary = summarize(&curves)?;

    Ok(RunOutput {
        input: *input,
        soil_class,
        plasticity_coefficient: n,
        range: *range,
        curves,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_eval_populates_all_outputs() {
        let run = run_eval(&SoilInput::new(30.0, 100.0), &StrainRange::default()).unwrap();
        assert_eq!(run.soil_class, SoilClass::MediumPlastic);
        assert_eq!(run.curves.len(), 100);
        assert!(run.plasticity_coefficient > 0.0);
        assert!(run.summary.reference_strain.is_some());
    }

    #[test]
    fn run_eval_reports_invalid_input_with_exit_code_2() {
        let err = run_eval(&SoilInput::new(-1.0, 100.0), &StrainRange::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
