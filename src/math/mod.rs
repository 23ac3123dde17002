//! Math primitives.

pub mod spacing;

pub use spacing::*;
