//! Epistemic Topology - Reaction-diffusion simulation of knowledge density.
//!
//! This crate advances a 2-D density field ρ under the master equation
//! `∂ρ/∂t = D·∇²ρ + σ·(0.1 + 0.5·ρ) − μ·ρ`, reports aggregate statistics
//! (total knowledge, peak density, Shannon entropy) each tick, and paints
//! the field as a heat map.
//!
//! # Architecture
//!
//! - `schema`: Parameters, constants and seeding
//! - `compute`: Field store, stepper and statistics
//! - `render`: Colour ramp and raster targets
//! - `animation`: Tick driver and wall-clock cadence
//! - `calibration`: Mean-field model fitted to observed diffusion series
//!
//! # Example
//!
//! ```rust,no_run
//! use epistemic_topology::{
//!     compute::{FieldStats, FieldStore},
//!     schema::{SeedSet, SimulationParams},
//! };
//!
//! // Seed the default field
//! let mut store = FieldStore::new(SimulationParams::default(), SeedSet::default());
//!
//! // Advance 100 ticks
//! store.run(100);
//!
//! let stats = FieldStats::from_grid(store.grid());
//! println!("Total knowledge after t={:.1}: {}", store.time(), stats.total);
//! ```

pub mod animation;
pub mod calibration;
pub mod compute;
pub mod render;
pub mod schema;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use animation::{AnimationDriver, Cadence, DriverState, TickSnapshot};
pub use compute::{FieldStats, FieldStore, Grid, step_grid};
pub use render::{PixelBuffer, RasterTarget, Renderer, color_of};
pub use schema::{SeedPoint, SeedSet, SimulationParams};
