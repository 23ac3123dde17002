//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - model inputs (`SoilInput`, `SoilClass`, `StrainRange`)
//! - evaluator outputs (`CurveSet`)
//! - run configuration (`EvalConfig`) and the saved curve schema (`CurveFile`)

pub mod types;

pub use types::*;
