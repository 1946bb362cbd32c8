//! Animation driving for epistemic density simulations.
//!
//! The driver owns the tick pipeline (stepper → statistics → renderer) and
//! its start/stop/reset lifecycle. Scheduling belongs to the host:
//!
//! ```text
//! host loop ──poll──▶ Cadence (50 ms, no catch-up)
//!     │
//!     └──tick──▶ AnimationDriver ──▶ FieldStore::advance   (DT = 0.1)
//!                                ──▶ FieldStats::from_grid
//!                                ──▶ Renderer::paint
//! ```
//!
//! Simulated time and wall-clock cadence are independent: the field always
//! advances by `DT` per tick regardless of how often the host ticks.

mod cadence;
mod driver;

pub use cadence::Cadence;
pub use driver::{AnimationDriver, DriverState, TickSnapshot};
