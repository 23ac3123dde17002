//! Plotters-powered dual-axis soil curve chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - logarithmic x axis
//! - a secondary y axis for damping on the same strain axis
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call.
pub struct SoilCurveChart<'a> {
    /// `(γ, G/Gmax)` line on the primary axis.
    pub modulus: &'a [(f64, f64)],
    /// `(γ, D)` line on the secondary axis.
    pub damping: &'a [(f64, f64)],
    /// Strain bounds (both > 0; the axis is logarithmic).
    pub x_bounds: [f64; 2],
    /// Primary (left) axis bounds for G/Gmax.
    pub y_bounds: [f64; 2],
    /// Secondary (right) axis bounds for damping.
    pub d_bounds: [f64; 2],
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for SoilCurveChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        let [d0, d1] = self.d_bounds;

        let all_finite = [x0, x1, y0, y1, d0, d1].iter().all(|v| v.is_finite());
        if !all_finite || x0 <= 0.0 || x1 <= x0 || y1 <= y0 || d1 <= d0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Right, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d((x0..x1).log_scale(), y0..y1)?
                .set_secondary_coord((x0..x1).log_scale(), d0..d1);

            chart
                .configure_mesh()
                .disable_y_mesh()
                .x_desc("strain")
                .y_desc("G/Gmax")
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&RGBColor(80, 80, 80))
                .draw()?;

            chart
                .configure_secondary_axes()
                .y_desc("damping")
                .y_labels(5)
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            let modulus_color = RGBColor(0, 255, 255); // cyan
            let damping_color = RGBColor(255, 0, 0); // red

            chart.draw_series(LineSeries::new(self.modulus.iter().copied(), &modulus_color))?;
            chart.draw_secondary_series(LineSeries::new(self.damping.iter().copied(), &damping_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
