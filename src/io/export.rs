//! Export evaluated curves to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::CurveSet;
use crate::error::AppError;

/// Write one row per strain sample to a CSV file.
pub fn write_curves_csv(path: &Path, curves: &CurveSet) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    let mut file = BufWriter::new(file);

    writeln!(file, "strain,modulus_ratio,damping_ratio")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for i in 0..curves.len() {
        writeln!(
            file,
            "{:.10e},{:.10},{:.10}",
            curves.strain[i], curves.modulus_ratio[i], curves.damping_ratio[i],
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    file.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluate_curves;

    #[test]
    fn csv_has_header_plus_one_row_per_sample() {
        let curves = evaluate_curves(12.0, 90.0).unwrap();
        let path = std::env::temp_dir().join(format!("iz_export_test_{}.csv", std::process::id()));

        write_curves_csv(&path, &curves).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 101);
        assert_eq!(lines[0], "strain,modulus_ratio,damping_ratio");
        let first: Vec<f64> = lines[1].split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(first.len(), 3);
        assert!((first[0] - 1e-6).abs() < 1e-15);
        assert!((first[1] - curves.modulus_ratio[0]).abs() < 1e-9);
    }
}
