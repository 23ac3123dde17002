//! Ratatui-based terminal UI.
//!
//! The TUI is the input-collection layer: a PI selector (0..=200, step 1), an
//! editable σm field, and a dual-axis chart of G/Gmax and damping over strain.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline::{RunOutput, run_eval};
use crate::domain::{PI_SLIDER_MAX, SoilClass, SoilInput, StrainRange};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::SoilCurveChart;

const FIELD_PI: usize = 0;
const FIELD_SIGMA: usize = 1;
const PI_COARSE_STEP: f64 = 10.0;
const SIGMA_STEP_KPA: f64 = 10.0;

/// Start the TUI.
pub fn run(input: SoilInput, range: StrainRange) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(input, range);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    input: SoilInput,
    range: StrainRange,
    sigma_input: String,
    selected_field: usize,
    editing_sigma: bool,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(input: SoilInput, range: StrainRange) -> Self {
        // The slider can only hold whole PI values in 0..=200, so an
        // out-of-range flag is reported before it is clamped away.
        let rejected = run_eval(&input, &range).err();
        let pi = if input.plasticity_index.is_nan() {
            0.0
        } else {
            input.plasticity_index.clamp(0.0, PI_SLIDER_MAX).round()
        };
        let mut app = Self {
            input: SoilInput::new(pi, input.mean_effective_stress),
            range,
            sigma_input: format!("{}", input.mean_effective_stress),
            selected_field: FIELD_PI,
            editing_sigma: false,
            status: String::new(),
            run: None,
        };
        app.recompute();
        if let Some(err) = rejected {
            if pi != input.plasticity_index && app.run.is_some() {
                app.status = format!("{err} PI reset to {pi}.");
            }
        }
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_sigma {
            self.handle_sigma_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.selected_field = FIELD_PI,
            KeyCode::Down => self.selected_field = FIELD_SIGMA,
            KeyCode::Left => self.adjust_field(-1.0),
            KeyCode::Right => self.adjust_field(1.0),
            KeyCode::PageDown => self.adjust_pi(-PI_COARSE_STEP),
            KeyCode::PageUp => self.adjust_pi(PI_COARSE_STEP),
            KeyCode::Enter => {
                if self.selected_field == FIELD_SIGMA {
                    self.editing_sigma = true;
                    self.sigma_input.clear();
                    self.status = "Editing σm (kPa). Enter to apply, Esc to cancel.".to_string();
                }
            }
            KeyCode::Char('d') => {
                if let Some(run) = &self.run {
                    match crate::debug::write_debug_bundle(run) {
                        Ok(path) => self.status = format!("Wrote debug bundle: {}", path.display()),
                        Err(err) => self.status = format!("Debug write failed: {err}"),
                    }
                } else {
                    self.status = "No curves to dump.".to_string();
                }
            }
            _ => {}
        }

        false
    }

    fn handle_sigma_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_sigma = false;
                self.sigma_input = format!("{}", self.input.mean_effective_stress);
                self.status = "σm edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_sigma = false;
                self.apply_sigma_input();
            }
            KeyCode::Backspace => {
                self.sigma_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() || c == '.' || c == '-' {
                    self.sigma_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn adjust_field(&mut self, delta: f64) {
        match self.selected_field {
            FIELD_PI => self.adjust_pi(delta),
            FIELD_SIGMA => {
                let next = self.input.mean_effective_stress + delta * SIGMA_STEP_KPA;
                // A step that would leave σm non-positive is ignored.
                if next > 0.0 {
                    self.set_sigma(next);
                }
            }
            _ => {}
        }
    }

    fn adjust_pi(&mut self, delta: f64) {
        self.input.plasticity_index = step_pi(self.input.plasticity_index, delta);
        self.recompute();
    }

    fn set_sigma(&mut self, sigma_m: f64) {
        self.input.mean_effective_stress = sigma_m;
        self.sigma_input = format!("{sigma_m}");
        self.recompute();
    }

    fn apply_sigma_input(&mut self) {
        let trimmed = self.sigma_input.trim();
        match trimmed.parse::<f64>() {
            Ok(v) => self.set_sigma(v),
            Err(e) => {
                self.status = format!("Invalid σm '{trimmed}': {e}");
                self.sigma_input = format!("{}", self.input.mean_effective_stress);
            }
        }
    }

    fn recompute(&mut self) {
        match run_eval(&self.input, &self.range) {
            Ok(run) => {
                self.status = format!(
                    "PI={} σm={} kPa",
                    self.input.plasticity_index, self.input.mean_effective_stress
                );
                self.run = Some(run);
            }
            Err(err) => {
                self.status = err.to_string();
                self.run = None;
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(4)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("iz", Style::default().fg(Color::Cyan)),
            Span::raw(" — Ishibashi-Zhang G/Gmax and damping"),
        ]));

        let class = if self.input.plasticity_index >= 0.0 {
            SoilClass::from_plasticity_index(self.input.plasticity_index).display_name()
        } else {
            "-"
        };
        lines.push(Line::from(Span::styled(
            format!(
                "PI: {} % ({class}) | σm: {} kPa | strain: [{:e}, {:e}] n={}",
                self.input.plasticity_index,
                self.input.mean_effective_stress,
                self.range.min,
                self.range.max,
                self.range.points,
            ),
            Style::default().fg(Color::Gray),
        )));

        if let Some(run) = &self.run {
            let s = &run.summary;
            let gamma_ref = s
                .reference_strain
                .map(|g| format!("{g:.2e}"))
                .unwrap_or_else(|| "-".to_string());
            lines.push(Line::from(Span::styled(
                format!(
                    "n(PI)={:.3e} | G/Gmax peak={:.4} | γ(0.5)={gamma_ref} | D=[{:.4}, {:.4}]",
                    run.plasticity_coefficient, s.modulus_ratio_peak, s.damping_min, s.damping_max,
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(5)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("G/Gmax (cyan, left) · damping (red, right)")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No curves (check inputs).")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let series = chart_series(run);
        let (chart_rect, insets) = chart_layout(inner);
        let widget = SoilCurveChart {
            modulus: &series.modulus,
            damping: &series.damping,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            d_bounds: series.d_bounds,
            fmt_x: fmt_axis_strain,
            fmt_y: fmt_axis_ratio,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &series);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let sigma_label = if self.editing_sigma {
            format!("{}_", self.sigma_input)
        } else {
            format!("{}", self.input.mean_effective_stress)
        };

        let items = vec![
            ListItem::new(format!(
                "PI (%): {} {}",
                self.input.plasticity_index,
                pi_gauge(self.input.plasticity_index, 30)
            )),
            ListItem::new(format!("σm (kPa): {sigma_label}")),
        ];

        let list = List::new(items)
            .block(Block::default().title("Inputs").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing_sigma {
            let hint = Paragraph::new("Editing σm…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn PI±10  Enter edit σm  d debug  q quit";
        let lines = vec![
            Line::from(vec![
                Span::styled(help, Style::default().fg(Color::Gray)),
                Span::raw(" | "),
                Span::styled(&self.status, Style::default().fg(Color::Yellow)),
            ]),
            Line::from(Span::styled(
                crate::report::CITATION,
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Move PI by `delta`, rounded to the slider step and clamped to `0..=200`.
fn step_pi(pi: f64, delta: f64) -> f64 {
    (pi + delta).round().clamp(0.0, PI_SLIDER_MAX)
}

/// A text slider like `[#####-----]` for the PI selector.
fn pi_gauge(pi: f64, width: usize) -> String {
    let u = (pi / PI_SLIDER_MAX).clamp(0.0, 1.0);
    let filled = (u * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

struct ChartSeries {
    modulus: Vec<(f64, f64)>,
    damping: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    d_bounds: [f64; 2],
}

/// Build chart series for Plotters.
fn chart_series(run: &RunOutput) -> ChartSeries {
    let curves = &run.curves;

    let mut x0 = run.range.min;
    let mut x1 = run.range.max;
    if !(x0.is_finite() && x1.is_finite()) || x0 <= 0.0 || x1 <= x0 {
        x0 = crate::domain::DEFAULT_STRAIN_MIN;
        x1 = crate::domain::DEFAULT_STRAIN_MAX;
    }

    // G/Gmax is anchored at 0 so the degradation reads against the full scale.
    let y_max = curves
        .modulus_ratio
        .iter()
        .copied()
        .fold(1.0_f64, f64::max);
    let d_max = curves
        .damping_ratio
        .iter()
        .copied()
        .fold(0.0_f64, f64::max);
    let d_max = if d_max > 0.0 { d_max } else { 1.0 };

    ChartSeries {
        modulus: curves.modulus_points(),
        damping: curves.damping_points(),
        x_bounds: [x0, x1],
        y_bounds: [0.0, y_max * 1.05],
        d_bounds: [0.0, d_max * 1.05],
    }
}

/// Decade tick positions (`10^k`) inside the strain bounds.
fn decade_ticks(bounds: [f64; 2]) -> Vec<f64> {
    // log10 of an exact power of ten can land an ulp off the integer.
    let lo = (bounds[0].log10() - 1e-9).ceil() as i32;
    let hi = (bounds[1].log10() + 1e-9).floor() as i32;
    (lo..=hi).map(|k| 10f64.powi(k)).collect()
}

fn fmt_axis_strain(v: f64) -> String {
    format!("{v:.0e}")
}

fn fmt_axis_ratio(v: f64) -> String {
    format!("{v:.2}")
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 8,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    series: &ChartSeries,
) {
    let style = Style::default().fg(Color::Gray);
    let [x0, x1] = series.x_bounds;
    let (lx0, lx1) = (x0.log10(), x1.log10());

    // x: one label per decade, positioned on the log scale.
    let y = chart.y + chart.height;
    if y < inner.y + inner.height - 1 {
        for tick in decade_ticks(series.x_bounds) {
            let u = (tick.log10() - lx0) / (lx1 - lx0);
            let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
            let label = fmt_axis_strain(tick);
            let label_len = label.len() as u16;
            let start = x.saturating_sub(label_len / 2);
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y,
                    width: label_len,
                    height: 1,
                },
            );
        }
    }

    // y: five labels on each side.
    let ticks = 5usize;
    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let row = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;

        let g_val = series.y_bounds[0] + u * (series.y_bounds[1] - series.y_bounds[0]);
        let label = fmt_axis_ratio(g_val);
        let label_len = label.len() as u16;
        let start = (inner.x + insets.left.saturating_sub(1)).saturating_sub(label_len);
        if start >= inner.x {
            frame.render_widget(
                Paragraph::new(label).style(style),
                Rect {
                    x: start,
                    y: row,
                    width: label_len,
                    height: 1,
                },
            );
        }

        let d_val = series.d_bounds[0] + u * (series.d_bounds[1] - series.d_bounds[0]);
        let label = fmt_axis_ratio(d_val);
        let label_len = label.len() as u16;
        let start = chart.x + chart.width + 1;
        if start + label_len <= inner.x + inner.width {
            frame.render_widget(
                Paragraph::new(label).style(Style::default().fg(Color::Red)),
                Rect {
                    x: start,
                    y: row,
                    width: label_len,
                    height: 1,
                },
            );
        }
    }

    let x_label = Paragraph::new("shear strain γ (log)")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new("G/Gmax")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(
        y_label,
        Rect {
            x: inner.x,
            y: inner.y,
            width: insets.left.saturating_sub(1),
            height: 1,
        },
    );

    let d_label = Paragraph::new("damping")
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    frame.render_widget(
        d_label,
        Rect {
            x: chart.x + chart.width,
            y: inner.y,
            width: insets.right,
            height: 1,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pi_steps_are_whole_and_clamped() {
        assert_eq!(step_pi(10.0, 1.0), 11.0);
        assert_eq!(step_pi(0.0, -1.0), 0.0);
        assert_eq!(step_pi(195.0, PI_COARSE_STEP), 200.0);
        assert_eq!(step_pi(12.4, 0.0), 12.0);
    }

    #[test]
    fn gauge_fills_proportionally() {
        assert_eq!(pi_gauge(0.0, 4), "[----]");
        assert_eq!(pi_gauge(100.0, 4), "[##--]");
        assert_eq!(pi_gauge(250.0, 4), "[####]");
    }

    #[test]
    fn decade_ticks_cover_default_sweep() {
        let ticks = decade_ticks([1e-6, 1e-2]);
        assert_eq!(ticks.len(), 5);
        assert!((ticks[0] - 1e-6).abs() < 1e-20);
        assert!((ticks[4] - 1e-2).abs() < 1e-16);
    }

    #[test]
    fn chart_bounds_contain_both_series() {
        let run = run_eval(&SoilInput::new(0.0, 100.0), &StrainRange::default()).unwrap();
        let s = chart_series(&run);
        assert_eq!(s.modulus.len(), 100);
        assert!(s.modulus.iter().all(|&(_, g)| g >= s.y_bounds[0] && g <= s.y_bounds[1]));
        assert!(s.damping.iter().all(|&(_, d)| d >= s.d_bounds[0] && d <= s.d_bounds[1]));
    }

    #[test]
    fn invalid_sigma_is_reported_in_status() {
        let mut app = App::new(SoilInput::new(20.0, 100.0), StrainRange::default());
        assert!(app.run.is_some());
        app.set_sigma(0.0);
        assert!(app.run.is_none());
        assert!(app.status.contains("sigma_m"));
    }

    #[test]
    fn sigma_steps_never_raise_on_left_or_go_non_positive() {
        let mut app = App::new(SoilInput::new(20.0, 1.0), StrainRange::default());
        app.selected_field = FIELD_SIGMA;
        app.adjust_field(-1.0);
        assert_eq!(app.input.mean_effective_stress, 1.0);

        app.set_sigma(25.0);
        app.adjust_field(-1.0);
        assert_eq!(app.input.mean_effective_stress, 15.0);

        app.set_sigma(5.0);
        app.adjust_field(1.0);
        assert_eq!(app.input.mean_effective_stress, 15.0);
        assert!(app.run.is_some());
    }

    #[test]
    fn out_of_range_pi_flag_is_reported_then_clamped() {
        let app = App::new(SoilInput::new(-1.0, 100.0), StrainRange::default());
        assert_eq!(app.input.plasticity_index, 0.0);
        assert!(app.run.is_some());
        assert!(app.status.contains("PI=-1"), "status: {}", app.status);
        assert!(app.status.contains("must be >= 0"), "status: {}", app.status);

        let app = App::new(SoilInput::new(20.0, 100.0), StrainRange::default());
        assert_eq!(app.status, "PI=20 σm=100 kPa");
    }
}
