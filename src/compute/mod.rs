//! Compute module - Field storage, stepping and statistics.

mod field;
mod stats;
mod stepper;

pub use field::*;
pub use stats::*;
pub use stepper::*;
