//! Debug bundle writer for inspecting every intermediate term of an evaluation.

use std::fmt::Write as _;
use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::app::pipeline::RunOutput;
use crate::error::AppError;
use crate::models::sample_terms;

/// Write a bundle under `./debug`.
pub fn write_debug_bundle(run: &RunOutput) -> Result<PathBuf, AppError> {
    write_debug_bundle_in(Path::new("debug"), run)
}

/// Write a bundle under `dir` and return its path.
pub fn write_debug_bundle_in(dir: &Path, run: &RunOutput) -> Result<PathBuf, AppError> {
    create_dir_all(dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!(
        "iz_debug_pi{}_sigma{}_{ts}.md",
        run.input.plasticity_index, run.input.mean_effective_stress
    ));

    let body = format_debug_bundle(run)?;
    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;
    file.write_all(body.as_bytes())
        .map_err(|e| AppError::new(4, format!("Failed to write debug file: {e}")))?;

    Ok(path)
}

/// Render the bundle as markdown.
pub fn format_debug_bundle(run: &RunOutput) -> Result<String, AppError> {
    let pi = run.input.plasticity_index;
    let sigma_m = run.input.mean_effective_stress;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "# iz debug bundle");
    let _ = writeln!(out, "- generated: {}", Local::now().to_rfc3339());
    let _ = writeln!(out, "- PI: {pi} ({})", run.soil_class.display_name());
    let _ = writeln!(out, "- sigma_m: {sigma_m} kPa");
    let _ = writeln!(out, "- n(PI): {:.6e}", run.plasticity_coefficient);
    let _ = writeln!(
        out,
        "- strain: [{:e}, {:e}] points={}",
        run.range.min, run.range.max, run.range.points
    );

    let _ = writeln!(out, "\n## Summary");
    let s = &run.summary;
    let _ = writeln!(out, "| metric | value |");
    let _ = writeln!(out, "| - | - |");
    let _ = writeln!(out, "| G/Gmax initial | {:.6} |", s.modulus_ratio_initial);
    let _ = writeln!(out, "| G/Gmax final | {:.6} |", s.modulus_ratio_final);
    let _ = writeln!(out, "| G/Gmax peak | {:.6} @ {:.4e} |", s.modulus_ratio_peak, s.strain_at_peak);
    let _ = writeln!(
        out,
        "| gamma_ref (G/Gmax=0.5) | {} |",
        s.reference_strain
            .map(|g| format!("{g:.4e}"))
            .unwrap_or_else(|| "-".to_string())
    );
    let _ = writeln!(out, "| damping min | {:.6} |", s.damping_min);
    let _ = writeln!(out, "| damping max | {:.6} |", s.damping_max);

    let _ = writeln!(out, "\n## Samples");
    let _ = writeln!(out, "| i | strain | m-m0 | K | sigma_m^(m-m0) | G/Gmax | D |");
    let _ = writeln!(out, "| - | - | - | - | - | - | - |");
    for (i, &strain) in run.curves.strain.iter().enumerate() {
        let t = sample_terms(strain, pi, sigma_m)?;
        let _ = writeln!(
            out,
            "| {i} | {:.4e} | {:.6} | {:.6} | {:.6} | {:.6} | {:.6} |",
            t.strain, t.m, t.k, t.stress_factor, t.modulus_ratio, t.damping_ratio
        );
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_eval;
    use crate::domain::{SoilInput, StrainRange};

    #[test]
    fn bundle_lists_every_sample() {
        let range = StrainRange { min: 1e-5, max: 1e-3, points: 7 };
        let run = run_eval(&SoilInput::new(25.0, 40.0), &range).unwrap();
        let md = format_debug_bundle(&run).unwrap();
        assert!(md.starts_with("# iz debug bundle\n"));
        let sample_rows = md.lines().filter(|l| l.starts_with("| ") && l.chars().nth(2).is_some_and(|c| c.is_ascii_digit())).count();
        assert_eq!(sample_rows, 7);
    }

    #[test]
    fn bundle_is_written_to_requested_dir() {
        let run = run_eval(&SoilInput::new(5.0, 20.0), &StrainRange::default()).unwrap();
        let dir = std::env::temp_dir().join(format!("iz_debug_test_{}", std::process::id()));
        let path = write_debug_bundle_in(&dir, &run).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
