//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the evaluator and consumed by reports/plots
//! - exported to JSON/CSV
//! - reloaded later for plotting

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::report::CurveSummary;

/// Lower strain bound of the default sweep.
pub const DEFAULT_STRAIN_MIN: f64 = 1e-6;
/// Upper strain bound of the default sweep.
pub const DEFAULT_STRAIN_MAX: f64 = 1e-2;
/// Number of samples in the default sweep.
pub const DEFAULT_STRAIN_POINTS: usize = 100;

/// Upper bound of the PI selector in the TUI.
pub const PI_SLIDER_MAX: f64 = 200.0;

/// The two scalar inputs of the Ishibashi–Zhang model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilInput {
    /// Plasticity index `PI` (%).
    pub plasticity_index: f64,
    /// Mean effective confining pressure `σm` (kPa).
    pub mean_effective_stress: f64,
}

impl SoilInput {
    pub fn new(plasticity_index: f64, mean_effective_stress: f64) -> Self {
        Self {
            plasticity_index,
            mean_effective_stress,
        }
    }
}

/// Soil family implied by the PI bracket of `n(PI)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoilClass {
    /// `PI = 0`
    Sandy,
    /// `0 < PI <= 15`
    LowPlastic,
    /// `15 < PI <= 70`
    MediumPlastic,
    /// `PI > 70`
    HighPlastic,
}

impl SoilClass {
    /// Classify a (validated, non-negative) plasticity index.
    pub fn from_plasticity_index(pi: f64) -> Self {
        if pi == 0.0 {
            SoilClass::Sandy
        } else if pi <= 15.0 {
            SoilClass::LowPlastic
        } else if pi <= 70.0 {
            SoilClass::MediumPlastic
        } else {
            SoilClass::HighPlastic
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SoilClass::Sandy => "sandy soil",
            SoilClass::LowPlastic => "low plastic soil",
            SoilClass::MediumPlastic => "medium plastic soil",
            SoilClass::HighPlastic => "high plastic soil",
        }
    }
}

/// Log-spaced strain sweep definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrainRange {
    pub min: f64,
    pub max: f64,
    pub points: usize,
}

impl Default for StrainRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_STRAIN_MIN,
            max: DEFAULT_STRAIN_MAX,
            points: DEFAULT_STRAIN_POINTS,
        }
    }
}

/// Parallel strain / modulus-ratio / damping-ratio sequences.
///
/// All three vectors have the same length; index `i` of each describes the
/// same strain sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveSet {
    pub strain: Vec<f64>,
    pub modulus_ratio: Vec<f64>,
    pub damping_ratio: Vec<f64>,
}

impl CurveSet {
    pub fn len(&self) -> usize {
        self.strain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strain.is_empty()
    }

    /// `(γ, G/Gmax)` pairs for plotting.
    pub fn modulus_points(&self) -> Vec<(f64, f64)> {
        self.strain
            .iter()
            .copied()
            .zip(self.modulus_ratio.iter().copied())
            .collect()
    }

    /// `(γ, D)` pairs for plotting.
    pub fn damping_points(&self) -> Vec<(f64, f64)> {
        self.strain
            .iter()
            .copied()
            .zip(self.damping_ratio.iter().copied())
            .collect()
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `.env`).
#[derive(Debug, Clone)]
pub struct EvalConfig {
    pub input: SoilInput,
    pub range: StrainRange,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    /// Number of rows in the printed sample table (0 hides it).
    pub table_rows: usize,

    pub export_csv: Option<std::path::PathBuf>,
    pub export_curve: Option<std::path::PathBuf>,
    pub debug_bundle: bool,
}

/// A saved curve file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub generated: DateTime<Local>,
    pub input: SoilInput,
    pub soil_class: SoilClass,
    /// `n(PI)` used by `K(γ)`.
    pub plasticity_coefficient: f64,
    pub range: StrainRange,
    pub curves: CurveSet,
    pub summary: CurveSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soil_class_follows_brackets() {
        assert_eq!(SoilClass::from_plasticity_index(0.0), SoilClass::Sandy);
        assert_eq!(SoilClass::from_plasticity_index(15.0), SoilClass::LowPlastic);
        assert_eq!(SoilClass::from_plasticity_index(15.5), SoilClass::MediumPlastic);
        assert_eq!(SoilClass::from_plasticity_index(70.0), SoilClass::MediumPlastic);
        assert_eq!(SoilClass::from_plasticity_index(70.5), SoilClass::HighPlastic);
    }

    #[test]
    fn default_range_matches_reference_sweep() {
        let r = StrainRange::default();
        assert_eq!(r.min, 1e-6);
        assert_eq!(r.max, 1e-2);
        assert_eq!(r.points, 100);
    }
}
