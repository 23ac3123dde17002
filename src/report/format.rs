//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::CurveSet;

/// Reference for the model implemented by this tool.
pub const CITATION: &str = "Ishibashi, I., & Zhang, X. (1993). Unified dynamic shear moduli and \
damping ratios of sand and clay. Soils and Foundations, 33(1), 182-191. \
https://doi.org/10.3208/sandf1972.33.182";

/// Plain-text rendering of the model equations.
pub const EQUATIONS: &[&str] = &[
    "G/Gmax    = K(γ, PI) · σm^(m(γ, PI) − m0)",
    "m(γ) − m0 = 0.272 · [1 − tanh(ln((0.000556/γ)^0.4))] · exp(−0.0145 · PI^1.3)",
    "K(γ)      = 0.5 · [1 + tanh(ln(((0.000102 + n(PI))/γ)^0.492))]",
    "D         = 0.333 · (1 + exp(−0.0145 · PI^1.3)) · 0.5 · (0.586 · (G/Gmax)² − 1.547 · G/Gmax + 1)",
    "n(PI)     = 0 (PI = 0) | 3.37e-6·PI^1.404 (≤ 15) | 7.0e-7·PI^1.976 (≤ 70) | 2.7e-5·PI^1.115 (> 70)",
];

/// Format the full run summary (inputs + derived metrics).
pub fn format_run_summary(run: &RunOutput) -> String {
    let mut out = String::new();
    let s = &run.summary;

    out.push_str("=== iz - Ishibashi-Zhang dynamic soil properties ===\n");
    out.push_str(&format!(
        "PI: {:.1} % ({}) | n(PI)={:.6e}\n",
        run.input.plasticity_index,
        run.soil_class.display_name(),
        run.plasticity_coefficient,
    ));
    out.push_str(&format!("σm: {:.2} kPa\n", run.input.mean_effective_stress));
    out.push_str(&format!(
        "Strain: [{:e}, {:e}] | points={}\n",
        run.range.min, run.range.max, run.range.points
    ));

    out.push_str("\nCurve summary:\n");
    out.push_str(&format!(
        "- G/Gmax: initial={:.4} final={:.4} peak={:.4} (at γ={:.3e})\n",
        s.modulus_ratio_initial, s.modulus_ratio_final, s.modulus_ratio_peak, s.strain_at_peak
    ));
    match s.reference_strain {
        Some(g) => out.push_str(&format!("- γ at G/Gmax=0.5: {g:.3e}\n")),
        None => out.push_str("- γ at G/Gmax=0.5: not reached in sweep\n"),
    }
    out.push_str(&format!(
        "- damping: min={:.4} max={:.4}\n",
        s.damping_min, s.damping_max
    ));
    out.push('\n');

    out
}

/// Format the model equations block.
pub fn format_equations() -> String {
    let mut out = String::from("Model:\n");
    for line in EQUATIONS {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Format a table with up to `rows` evenly spread samples (first and last always included).
pub fn format_table(curves: &CurveSet, rows: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>12} {:>10} {:>10}\n", "strain", "G/Gmax", "damping"));
    out.push_str(&format!("{:->12} {:->10} {:->10}\n", "", "", ""));

    for i in table_indices(curves.len(), rows) {
        out.push_str(&format!(
            "{:>12.4e} {:>10.4} {:>10.4}\n",
            curves.strain[i], curves.modulus_ratio[i], curves.damping_ratio[i]
        ));
    }

    out
}

fn table_indices(len: usize, rows: usize) -> Vec<usize> {
    if len == 0 || rows == 0 {
        return Vec::new();
    }
    if rows >= len {
        return (0..len).collect();
    }
    if rows == 1 {
        return vec![0];
    }

    let mut out: Vec<usize> = (0..rows)
        .map(|i| ((i as f64 / (rows as f64 - 1.0)) * (len as f64 - 1.0)).round() as usize)
        .collect();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_eval;
    use crate::domain::{SoilInput, StrainRange};

    #[test]
    fn table_indices_spread_evenly_and_keep_endpoints() {
        assert_eq!(table_indices(100, 5), vec![0, 25, 50, 74, 99]);
        assert_eq!(table_indices(3, 10), vec![0, 1, 2]);
        assert!(table_indices(10, 0).is_empty());
    }

    #[test]
    fn table_has_header_and_requested_rows() {
        let run = run_eval(&SoilInput::new(20.0, 50.0), &StrainRange::default()).unwrap();
        let txt = format_table(&run.curves, 8);
        assert_eq!(txt.lines().count(), 2 + 8);
        assert!(txt.starts_with("      strain"));
    }

    #[test]
    fn run_summary_mentions_inputs_and_class() {
        let run = run_eval(&SoilInput::new(0.0, 100.0), &StrainRange::default()).unwrap();
        let txt = format_run_summary(&run);
        assert!(txt.contains("sandy soil"));
        assert!(txt.contains("σm: 100.00 kPa"));
        assert!(txt.contains("points=100"));
    }
}
