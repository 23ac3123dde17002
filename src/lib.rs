//! `iz-curves` library crate.
//!
//! Ishibashi–Zhang (1993) shear-modulus reduction and damping curves for a soil
//! described by its plasticity index and mean effective confining pressure.
//!
//! The binary (`iz`) is a thin wrapper around this library so that:
//!
//! - the model (`models`) is usable as a pure numeric API without the shell
//! - core logic is testable without spawning processes
//! - presentation (CLI, TUI, plots, exports) stays out of the model code

pub mod app;
pub mod cli;
pub mod debug;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
