//! Ishibashi–Zhang dynamic soil property model.
//!
//! The model is implemented as small, pure functions (`ishibashi_zhang`) plus a
//! sweep evaluator (`evaluator`) that produces the parallel curve sequences.

pub mod evaluator;
pub mod ishibashi_zhang;

pub use evaluator::*;
pub use ishibashi_zhang::*;
