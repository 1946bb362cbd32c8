//! Stepper - forward-Euler update of the density field.
//!
//! Discretizes `∂ρ/∂t = D·∇²ρ + σ·(0.1 + 0.5·ρ) − μ·ρ` on the interior
//! cells with a 5-point Laplacian, then mirrors the outermost ring from
//! its interior neighbours (zero-flux boundary).

use crate::schema::{DENSITY_CAP, DT, DX, SimulationParams};

use super::Grid;

/// Baseline spontaneous creation, independent of local density.
pub const CREATION_FLOOR: f32 = 0.1;

/// Share of local density that feeds back into creation.
pub const CREATION_FEEDBACK: f32 = 0.5;

/// 5-point discrete Laplacian at interior cell (x, y).
#[inline]
pub fn laplacian(cells: &[f32], size: usize, x: usize, y: usize) -> f32 {
    let idx = y * size + x;
    let sum = cells[idx - size] + cells[idx + size] + cells[idx - 1] + cells[idx + 1];
    (sum - 4.0 * cells[idx]) / (DX * DX)
}

/// Local creation term `σ·(0.1 + 0.5·ρ)`.
#[inline]
pub fn creation(rho: f32, sigma: f32) -> f32 {
    sigma * (CREATION_FLOOR + CREATION_FEEDBACK * rho)
}

/// Right-hand side of the master equation at one interior cell.
#[inline]
pub fn rate_of_change(
    cells: &[f32],
    size: usize,
    x: usize,
    y: usize,
    params: &SimulationParams,
) -> f32 {
    let rho = cells[y * size + x];
    let diffusion = params.diffusion * laplacian(cells, size, x, y);
    let dissipation = params.dissipation * rho;
    diffusion + creation(rho, params.creation) - dissipation
}

/// Produce the grid one tick after `grid`.
///
/// `grid` is only read; the result is written into a fresh buffer so the
/// stencil never sees values from the tick being computed. Grids smaller
/// than 3×3 have no interior and are returned unchanged.
pub fn step_grid(grid: &Grid, params: &SimulationParams) -> Grid {
    let size = grid.size();
    if size < 3 {
        return grid.clone();
    }

    let cells = grid.cells();
    let mut next = Grid::zeros(size);

    {
        let out = next.cells_mut();
        for y in 1..size - 1 {
            let row = y * size;
            for x in 1..size - 1 {
                let rho = cells[row + x];
                let value = rho + DT * rate_of_change(cells, size, x, y, params);
                out[row + x] = value.clamp(0.0, DENSITY_CAP);
            }
        }
    }

    apply_reflective_boundary(&mut next);
    next
}

/// Copy interior values onto the outermost ring.
///
/// Rows are copied first (row 0 ← row 1, row N−1 ← row N−2), then columns
/// (column 0 ← column 1, column N−1 ← column N−2). Corners are written by
/// both passes, so they end up holding the column-pass value.
pub fn apply_reflective_boundary(grid: &mut Grid) {
    let size = grid.size();
    if size < 3 {
        return;
    }
    let cells = grid.cells_mut();

    // Rows
    cells.copy_within(size..2 * size, 0);
    cells.copy_within((size - 2) * size..(size - 1) * size, (size - 1) * size);

    // Columns
    for y in 0..size {
        let row = y * size;
        cells[row] = cells[row + 1];
        cells[row + size - 1] = cells[row + size - 2];
    }
}
