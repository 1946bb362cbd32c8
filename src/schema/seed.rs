//! Seed types for initializing epistemic density fields.

use serde::{Deserialize, Serialize};

use super::{ConfigError, DENSITY_CAP};

/// Radius of the disk stamped around each seed, in cells.
pub const SEED_RADIUS: i64 = 3;

/// Largest accepted seed coordinate magnitude; a disk around it stays within `i64`.
pub const SEED_COORD_LIMIT: i64 = i64::MAX - SEED_RADIUS;

/// A single knowledge centre (a university, a library) stamped at startup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeedPoint {
    /// Column of the disk centre.
    pub x: i64,
    /// Row of the disk centre.
    pub y: i64,
    /// Density at the centre; falls off linearly to zero at [`SEED_RADIUS`].
    pub intensity: f32,
}

/// Ordered list of seeds applied at (re)initialization only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedSet {
    pub seeds: Vec<SeedPoint>,
}

impl Default for SeedSet {
    fn default() -> Self {
        Self {
            seeds: vec![
                SeedPoint::new(20, 20, 1.0),
                SeedPoint::new(70, 30, 0.8),
                SeedPoint::new(50, 80, 0.6),
                SeedPoint::new(30, 60, 0.9),
            ],
        }
    }
}

impl SeedPoint {
    pub const fn new(x: i64, y: i64, intensity: f32) -> Self {
        Self { x, y, intensity }
    }
}

impl SeedSet {
    /// No seeds: initialization yields an all-zero field.
    pub fn empty() -> Self {
        Self { seeds: Vec::new() }
    }

    /// Check every seed can be stamped without leaving `[0, DENSITY_CAP]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, seed) in self.seeds.iter().enumerate() {
            if !(0.0..=DENSITY_CAP).contains(&seed.intensity) {
                return Err(ConfigError::SeedIntensity {
                    index,
                    value: seed.intensity,
                    max: DENSITY_CAP,
                });
            }
            let in_reach = |c: i64| (-SEED_COORD_LIMIT..=SEED_COORD_LIMIT).contains(&c);
            if !in_reach(seed.x) || !in_reach(seed.y) {
                return Err(ConfigError::SeedOutOfReach {
                    index,
                    x: seed.x,
                    y: seed.y,
                    limit: SEED_COORD_LIMIT,
                });
            }
        }
        Ok(())
    }

    /// Generate a row-major `size × size` field with every seed stamped in order.
    ///
    /// Overlapping disks overwrite each other, so the last seed wins.
    pub fn generate(&self, size: usize) -> Vec<f32> {
        let mut cells = vec![0.0f32; size * size];
        for seed in &self.seeds {
            stamp_disk(&mut cells, size, seed);
        }
        cells
    }
}

fn stamp_disk(cells: &mut [f32], size: usize, seed: &SeedPoint) {
    let radius = SEED_RADIUS as f32;
    let n = size as i64;

    for j in -SEED_RADIUS..=SEED_RADIUS {
        for i in -SEED_RADIUS..=SEED_RADIUS {
            let (Some(x), Some(y)) = (seed.x.checked_add(i), seed.y.checked_add(j)) else {
                continue;
            };
            if x < 0 || x >= n || y < 0 || y >= n {
                continue;
            }
            let dist = ((i * i + j * j) as f32).sqrt();
            if dist <= radius {
                cells[y as usize * size + x as usize] = seed.intensity * (1.0 - dist / radius);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_centres() {
        let size = 100;
        let cells = SeedSet::default().generate(size);

        assert!((cells[20 * size + 20] - 1.0).abs() < 1e-6);
        assert!((cells[30 * size + 70] - 0.8).abs() < 1e-6);
        assert!((cells[80 * size + 50] - 0.6).abs() < 1e-6);
        assert!((cells[60 * size + 30] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_linear_falloff() {
        let size = 16;
        let seeds = SeedSet {
            seeds: vec![SeedPoint::new(8, 8, 1.0)],
        };
        let cells = seeds.generate(size);

        // One cell away along an axis: 1 - 1/3.
        assert!((cells[8 * size + 9] - 2.0 / 3.0).abs() < 1e-6);
        // On the rim the density reaches zero.
        assert_eq!(cells[8 * size + 11], 0.0);
        // Diagonal (2, 2) has dist ≈ 2.83 which is inside the disk.
        let expected = 1.0 - (8.0f32).sqrt() / 3.0;
        assert!((cells[10 * size + 10] - expected).abs() < 1e-6);
        // Diagonal (3, 3) is outside.
        assert_eq!(cells[11 * size + 11], 0.0);
    }

    #[test]
    fn test_last_seed_wins_on_overlap() {
        let size = 16;
        let seeds = SeedSet {
            seeds: vec![
                SeedPoint::new(8, 8, 1.0),
                SeedPoint::new(9, 8, 0.3),
            ],
        };
        let cells = seeds.generate(size);

        // Cell (8, 8) is the first seed's centre but one step from the second seed.
        let expected = 0.3 * (1.0 - 1.0 / 3.0);
        assert!((cells[8 * size + 8] - expected).abs() < 1e-6);
    }

    #[test]
    fn test_clipped_at_grid_edge() {
        let size = 5;
        let seeds = SeedSet {
            seeds: vec![SeedPoint::new(0, 0, 0.9)],
        };
        let cells = seeds.generate(size);

        assert_eq!(cells.len(), 25);
        assert!((cells[0] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_seed_outside_small_grid_is_ignored() {
        let cells = SeedSet::default().generate(10);
        assert!(cells.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_validate_rejects_bad_intensity() {
        assert!(SeedSet::default().validate().is_ok());

        let seeds = SeedSet {
            seeds: vec![SeedPoint::new(10, 10, 5.0)],
        };
        assert_eq!(
            seeds.validate(),
            Err(ConfigError::SeedIntensity {
                index: 0,
                value: 5.0,
                max: DENSITY_CAP
            })
        );

        for value in [-0.1, f32::INFINITY, f32::NAN] {
            let seeds = SeedSet {
                seeds: vec![SeedPoint::new(4, 4, 1.0), SeedPoint::new(4, 4, value)],
            };
            assert!(matches!(
                seeds.validate(),
                Err(ConfigError::SeedIntensity { index: 1, .. })
            ));
        }
    }

    #[test]
    fn test_validate_rejects_unreachable_centre() {
        let seeds = SeedSet {
            seeds: vec![SeedPoint::new(i64::MAX, 0, 1.0)],
        };
        assert!(matches!(
            seeds.validate(),
            Err(ConfigError::SeedOutOfReach { index: 0, .. })
        ));

        let edge = SeedSet {
            seeds: vec![SeedPoint::new(-SEED_COORD_LIMIT, SEED_COORD_LIMIT, 1.0)],
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let seeds = SeedSet {
            seeds: vec![
                SeedPoint::new(i64::MAX, i64::MIN, 1.0),
                SeedPoint::new(i64::MIN, i64::MAX, 1.0),
            ],
        };
        assert!(seeds.generate(8).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_seed_set_json_round_trip() {
        let json = serde_json::to_string(&SeedSet::default()).unwrap();
        let parsed: SeedSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, SeedSet::default());
    }
}
