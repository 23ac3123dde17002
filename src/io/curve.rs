//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of an evaluation:
//! - inputs (PI, σm), soil class and `n(PI)`
//! - the strain sweep definition
//! - the evaluated strain / G/Gmax / damping sequences
//! - the curve summary
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use chrono::Local;

use crate::app::pipeline::RunOutput;
use crate::domain::CurveFile;
use crate::error::AppError;

/// Build the serializable curve document for a run.
pub fn curve_file(run: &RunOutput) -> CurveFile {
    CurveFile {
        tool: "iz".to_string(),
        generated: Local::now(),
        input: run.input,
        soil_class: run.soil_class,
        plasticity_coefficient: run.plasticity_coefficient,
        range: run.range,
        curves: run.curves.clone(),
        summary: run.summary.clone(),
    }
}

/// Write a curve JSON file.
pub fn write_curve_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &curve_file(run))
        .map_err(|e| AppError::new(2, format!("Failed to write curve JSON: {e}")))?;

    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;

    let n = curve.curves.strain.len();
    if curve.curves.modulus_ratio.len() != n || curve.curves.damping_ratio.len() != n {
        return Err(AppError::new(
            2,
            format!("Invalid curve JSON '{}': curve lengths differ.", path.display()),
        ));
    }
    Ok(curve)
}
