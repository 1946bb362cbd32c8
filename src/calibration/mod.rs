//! Calibration of the mean-field model against observed diffusion series.
//!
//! Collapsing the spatial field to a single well-mixed density turns the
//! master equation into `dρ/dt = D·ρ·(1−ρ) + σ − μ·ρ`, which can be run
//! directly against adoption curves (search interest, publication counts)
//! to judge how well a parameter set explains them.

mod cases;
mod metrics;
mod model;
mod sensitivity;

pub use cases::*;
pub use metrics::*;
pub use model::*;
pub use sensitivity::*;
