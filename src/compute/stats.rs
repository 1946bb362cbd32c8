//! Statistics collector - aggregate scalars derived from a grid snapshot.

use serde::{Deserialize, Serialize};

use super::Grid;

/// Field statistics recomputed after every tick. No history is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Sum of all cells (total knowledge Φ).
    pub total: f32,
    /// Largest cell value.
    pub max: f32,
    /// Shannon entropy in bits of the normalized field.
    pub entropy: f32,
}

impl FieldStats {
    /// Compute statistics from a grid.
    pub fn from_grid(grid: &Grid) -> Self {
        let cells = grid.cells();

        let mut total = 0.0f64;
        let mut max = 0.0f32;
        for &v in cells {
            total += v as f64;
            max = max.max(v);
        }

        Self {
            total: total as f32,
            max,
            entropy: shannon_entropy(cells, total) as f32,
        }
    }
}

/// Entropy `-Σ p·log2(p)` with `p = v / total`.
///
/// Cells with `p == 0` contribute nothing. A zero total yields zero.
pub fn shannon_entropy(cells: &[f32], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }

    let mut entropy = 0.0f64;
    for &v in cells {
        let p = v as f64 / total;
        if p > 0.0 {
            entropy -= p * p.log2();
        }
    }
    entropy
}
