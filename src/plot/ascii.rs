//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - x axis: strain on a log10 scale
//! - modulus ratio: `-` line, scaled to its own (left) range
//! - damping ratio: `.` line, scaled to its own (right) range

use crate::domain::{CurveFile, CurveSet};

/// Render a dual-series plot for an evaluated curve set.
pub fn render_ascii_plot(curves: &CurveSet, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let Some((x_min, x_max)) = strain_range(&curves.strain) else {
        return "Plot: no strain samples to draw.\n".to_string();
    };
    let (g_min, g_max) = value_range(&curves.modulus_ratio).unwrap_or((0.0, 1.0));
    let (g_min, g_max) = pad_range(g_min, g_max, 0.05);
    let (d_min, d_max) = value_range(&curves.damping_ratio).unwrap_or((0.0, 1.0));
    let (d_min, d_max) = pad_range(d_min, d_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    let modulus: Vec<(usize, usize)> = curves
        .strain
        .iter()
        .zip(&curves.modulus_ratio)
        .map(|(&x, &y)| (map_x(x, x_min, x_max, width), map_y(y, g_min, g_max, height)))
        .collect();
    let damping: Vec<(usize, usize)> = curves
        .strain
        .iter()
        .zip(&curves.damping_ratio)
        .map(|(&x, &y)| (map_x(x, x_min, x_max, width), map_y(y, d_min, d_max, height)))
        .collect();

    // Modulus first; damping only fills cells the modulus line left blank.
    draw_polyline(&mut grid, &modulus, '-');
    draw_polyline(&mut grid, &damping, '.');

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: strain=[{x_min:.0e}, {x_max:.0e}] (log) | G/Gmax(-)=[{g_min:.3}, {g_max:.3}] | damping(.)=[{d_min:.3}, {d_max:.3}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

/// Render a plot from a saved curve JSON file.
pub fn render_ascii_plot_from_curve_file(curve: &CurveFile, width: usize, height: usize) -> String {
    render_ascii_plot(&curve.curves, width, height)
}

fn strain_range(strain: &[f64]) -> Option<(f64, f64)> {
    let (min, max) = value_range(strain)?;
    if min > 0.0 { Some((min, max)) } else { None }
}

fn value_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut min_v = f64::INFINITY;
    let mut max_v = f64::NEG_INFINITY;
    for &v in values {
        min_v = min_v.min(v);
        max_v = max_v.max(v);
    }
    if min_v.is_finite() && max_v.is_finite() && max_v > min_v {
        Some((min_v, max_v))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x.ln() - x_min.ln()) / (x_max.ln() - x_min.ln())).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(grid: &mut [Vec<char>], cells: &[(usize, usize)], ch: char) {
    let mut prev = None;
    for &(x, y) in cells {
        match prev {
            Some((x0, y0)) => draw_line(grid, x0, y0, x, y, ch),
            None => draw_line(grid, x, y, x, y, ch),
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::evaluate_curves;

    fn rows(txt: &str) -> Vec<Vec<char>> {
        txt.lines().skip(1).map(|l| l.chars().collect()).collect()
    }

    #[test]
    fn plot_has_header_and_fixed_grid() {
        let curves = evaluate_curves(30.0, 100.0).unwrap();
        let txt = render_ascii_plot(&curves, 40, 12);
        assert!(txt.starts_with("Plot: strain=[1e-6, 1e-2] (log)"));
        let grid = rows(&txt);
        assert_eq!(grid.len(), 12);
        assert!(grid.iter().all(|r| r.len() == 40));
    }

    #[test]
    fn curves_start_at_opposite_corners() {
        // σm = 1: G/Gmax falls from its maximum while damping rises from its minimum.
        let curves = evaluate_curves(0.0, 1.0).unwrap();
        let grid = rows(&render_ascii_plot(&curves, 20, 5));
        assert_eq!(grid[0][0], '-');
        assert_eq!(grid[4][0], '.');
        assert_eq!(grid[4][19], '-');
        assert_eq!(grid[0][19], '.');
    }

    #[test]
    fn tiny_dimensions_are_clamped() {
        let curves = evaluate_curves(10.0, 50.0).unwrap();
        let grid = rows(&render_ascii_plot(&curves, 1, 1));
        assert_eq!(grid.len(), 5);
        assert_eq!(grid[0].len(), 10);
    }

    #[test]
    fn empty_curves_render_a_hint() {
        let curves = CurveSet {
            strain: vec![],
            modulus_ratio: vec![],
            damping_ratio: vec![],
        };
        assert_eq!(render_ascii_plot(&curves, 20, 5), "Plot: no strain samples to draw.\n");
    }
}
