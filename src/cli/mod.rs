//! Command-line parsing for the Ishibashi–Zhang curve tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the model code.
//!
//! Every model input can also come from the environment (or a local `.env`,
//! loaded before parsing), so a fixed soil can be configured once.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_STRAIN_MAX, DEFAULT_STRAIN_MIN, DEFAULT_STRAIN_POINTS, SoilInput, StrainRange};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "iz",
    version,
    about = "Ishibashi-Zhang G/Gmax and damping curves for a soil (PI, σm)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate the curves, print a summary/table/plot, and optionally export.
    Eval(EvalArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// Uses the same evaluation pipeline as `iz eval`, with PI and σm adjustable
    /// from the keyboard.
    Tui(InputArgs),
}

/// Model inputs and strain sweep.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Plasticity index PI (%).
    #[arg(long = "pi", env = "IZ_PI", default_value_t = 0.0, allow_negative_numbers = true)]
    pub pi: f64,

    /// Mean effective confining pressure σm (kPa).
    #[arg(
        short = 's',
        long = "sigma-m",
        env = "IZ_SIGMA_M",
        default_value_t = 100.0,
        allow_negative_numbers = true
    )]
    pub sigma_m: f64,

    /// Smallest strain of the log-spaced sweep.
    #[arg(long, env = "IZ_STRAIN_MIN", default_value_t = DEFAULT_STRAIN_MIN, allow_negative_numbers = true)]
    pub strain_min: f64,

    /// Largest strain of the log-spaced sweep.
    #[arg(long, env = "IZ_STRAIN_MAX", default_value_t = DEFAULT_STRAIN_MAX, allow_negative_numbers = true)]
    pub strain_max: f64,

    /// Number of strain samples.
    #[arg(long, env = "IZ_POINTS", default_value_t = DEFAULT_STRAIN_POINTS)]
    pub points: usize,
}

impl InputArgs {
    pub fn soil_input(&self) -> SoilInput {
        SoilInput::new(self.pi, self.sigma_m)
    }

    pub fn strain_range(&self) -> StrainRange {
        StrainRange {
            min: self.strain_min,
            max: self.strain_max,
            points: self.points,
        }
    }
}

/// Options for `iz eval`.
#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Render an ASCII plot in the terminal (enabled by default).
    #[arg(long, default_value_t = true)]
    pub plot: bool,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Rows of the printed sample table (0 hides the table).
    #[arg(long, default_value_t = 11)]
    pub table_rows: usize,

    /// Export strain / G/Gmax / damping to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the full evaluation (inputs + curves + summary) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,

    /// Write a markdown debug bundle with every intermediate term under `debug/`.
    #[arg(long)]
    pub debug_bundle: bool,
}

/// Options for plotting a saved curve.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Curve JSON file produced by `iz eval --export-curve`.
    #[arg(long, value_name = "JSON")]
    pub curve: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
