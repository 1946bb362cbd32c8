//! Configuration types for epistemic density simulation parameters.

use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Logical time advanced by one tick.
pub const DT: f32 = 0.1;

/// Spatial step of the finite-difference grid.
pub const DX: f32 = 1.0;

/// Ceiling every cell is clamped to after an update.
pub const DENSITY_CAP: f32 = 2.0;

/// Wall-clock interval between ticks when the driver is paced in real time.
///
/// Independent of [`DT`]: changing one never changes the other.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Smallest grid that still has an interior cell.
pub const MIN_GRID_SIZE: usize = 3;

/// Default grid side length.
pub const DEFAULT_GRID_SIZE: usize = 100;

/// Accepted range for the diffusion coefficient D.
pub const DIFFUSION_RANGE: RangeInclusive<f32> = 0.0..=1.0;
/// Accepted range for the creation rate σ.
pub const CREATION_RANGE: RangeInclusive<f32> = 0.0..=0.1;
/// Accepted range for the dissipation rate μ.
pub const DISSIPATION_RANGE: RangeInclusive<f32> = 0.0..=0.05;

fn default_grid_size() -> usize {
    DEFAULT_GRID_SIZE
}

/// Parameters of the master equation `∂ρ/∂t = D·∇²ρ + σ(ρ) − μ·ρ`.
///
/// Read-only to the stepper during a tick. Hosts mutate it between ticks
/// through [`crate::animation::AnimationDriver::set_params`], which validates
/// before applying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Diffusion coefficient D (knowledge sharing).
    pub diffusion: f32,
    /// Creation rate σ (innovation).
    pub creation: f32,
    /// Dissipation rate μ (forgetting).
    pub dissipation: f32,
    /// Grid side length N.
    #[serde(default = "default_grid_size", alias = "gridSize")]
    pub grid_size: usize,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            diffusion: 0.5,
            creation: 0.02,
            dissipation: 0.01,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

impl SimulationParams {
    /// Parameters with every rate set to zero. The field never changes under these.
    pub fn frozen(grid_size: usize) -> Self {
        Self {
            diffusion: 0.0,
            creation: 0.0,
            dissipation: 0.0,
            grid_size,
        }
    }

    /// Total number of cells (N²).
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Validate parameters against the ranges exposed to hosts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("diffusion", self.diffusion, &DIFFUSION_RANGE)?;
        check_rate("creation", self.creation, &CREATION_RANGE)?;
        check_rate("dissipation", self.dissipation, &DISSIPATION_RANGE)?;
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall {
                size: self.grid_size,
                min: MIN_GRID_SIZE,
            });
        }
        Ok(())
    }
}

fn check_rate(
    name: &'static str,
    value: f32,
    range: &RangeInclusive<f32>,
) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name });
    }
    if !range.contains(&value) {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min: *range.start(),
            max: *range.end(),
        });
    }
    Ok(())
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Parameter `{name}` must be finite")]
    NonFinite { name: &'static str },
    #[error("Parameter `{name}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("Grid size {size} is below the minimum of {min}")]
    GridTooSmall { size: usize, min: usize },
    #[error("Seed {index} intensity {value} is outside [0, {max}]")]
    SeedIntensity { index: usize, value: f32, max: f32 },
    #[error("Seed {index} centre ({x}, {y}) is outside [-{limit}, {limit}]")]
    SeedOutOfReach {
        index: usize,
        x: i64,
        y: i64,
        limit: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let params = SimulationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.grid_size, 100);
        assert_eq!(params.cell_count(), 10_000);
    }

    #[test]
    fn test_rejects_non_finite() {
        let params = SimulationParams {
            diffusion: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::NonFinite { name: "diffusion" })
        );
    }

    #[test]
    fn test_rejects_out_of_range() {
        let params = SimulationParams {
            dissipation: 0.2,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ConfigError::OutOfRange {
                name: "dissipation",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_small_grid() {
        let params = SimulationParams {
            grid_size: 2,
            ..Default::default()
        };
        assert_eq!(
            params.validate(),
            Err(ConfigError::GridTooSmall { size: 2, min: 3 })
        );
        assert!(SimulationParams::frozen(3).validate().is_ok());
    }

    #[test]
    fn test_deserialize_camel_case_grid_size() {
        let json = r#"{"diffusion":0.3,"creation":0.01,"dissipation":0.02,"gridSize":64}"#;
        let params: SimulationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.grid_size, 64);
        assert!((params.diffusion - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_grid_size_defaults_when_missing() {
        let json = r#"{"diffusion":0.3,"creation":0.01,"dissipation":0.02}"#;
        let params: SimulationParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.grid_size, DEFAULT_GRID_SIZE);
    }

    #[test]
    fn test_time_constants_are_independent() {
        assert!((DT - 0.1).abs() < f32::EPSILON);
        assert_eq!(TICK_INTERVAL.as_millis(), 50);
    }
}
