//! Schema module - Parameter and seeding types for epistemic density simulations.

mod config;
mod loader;
mod seed;

pub use config::*;
pub use loader::*;
pub use seed::*;
