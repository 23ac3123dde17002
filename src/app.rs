//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults and parses CLI arguments
//! - evaluates the Ishibashi–Zhang curves
//! - prints reports/plots
//! - writes optional exports and debug bundles

use clap::Parser;

use crate::cli::{Command, EvalArgs, PlotArgs};
use crate::domain::EvalConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `iz` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` values feed clap's `env = ...` fallbacks; a missing file is fine.
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Eval(args) => handle_eval(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(args.soil_input(), args.strain_range()),
    }
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let config = eval_config_from_args(&args);
    let run = pipeline::run_eval(&config.input, &config.range)?;

    println!("{}", crate::report::format_run_summary(&run));

    if config.table_rows > 0 {
        println!("{}", crate::report::format_table(&run.curves, config.table_rows));
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.curves, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    println!("{}", crate::report::format_equations());
    println!("Reference: {}", crate::report::CITATION);

    // Optional exports.
    if let Some(path) = &config.export_csv {
        crate::io::export::write_curves_csv(path, &run.curves)?;
        eprintln!("Wrote {}", path.display());
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_curve_json(path, &run)?;
        eprintln!("Wrote {}", path.display());
    }
    if config.debug_bundle {
        let path = crate::debug::write_debug_bundle(&run)?;
        eprintln!("Wrote debug bundle: {}", path.display());
    }

    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve)?;

    println!(
        "PI={:.1} ({}) | σm={:.2} kPa",
        curve.input.plasticity_index,
        curve.soil_class.display_name(),
        curve.input.mean_effective_stress,
    );
    let plot = crate::plot::render_ascii_plot_from_curve_file(&curve, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn eval_config_from_args(args: &EvalArgs) -> EvalConfig {
    EvalConfig {
        input: args.input.soil_input(),
        range: args.input.strain_range(),
        plot: args.plot && !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        table_rows: args.table_rows,
        export_csv: args.export.clone(),
        export_curve: args.export_curve.clone(),
        debug_bundle: args.debug_bundle,
    }
}

/// Rewrite argv so `iz` defaults to `iz tui`.
///
/// Rules:
/// - `iz`                        -> `iz tui`
/// - `iz --pi 20 ...`            -> `iz tui --pi 20 ...`
/// - `iz --help/--version/-h`    -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "eval" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["iz"])), argv(&["iz", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["iz", "--pi", "20"])),
            argv(&["iz", "tui", "--pi", "20"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(rewrite_args(argv(&["iz", "eval", "--pi", "5"])), argv(&["iz", "eval", "--pi", "5"]));
        assert_eq!(rewrite_args(argv(&["iz", "--help"])), argv(&["iz", "--help"]));
    }

    #[test]
    fn no_plot_overrides_plot_default() {
        let cli = crate::cli::Cli::parse_from(["iz", "eval", "--no-plot", "--table-rows", "0"]);
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        let config = eval_config_from_args(&args);
        assert!(!config.plot);
        assert_eq!(config.table_rows, 0);
    }
}
