//! Field store - owns the live density grid, its parameters and simulated time.

use crate::schema::{DT, SeedSet, SimulationParams};

use super::step_grid;

/// Square density grid stored row-major: `cells[y * size + x]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<f32>,
}

impl Grid {
    /// All-zero grid of side `size`.
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0f32; size * size],
        }
    }

    /// Wrap existing row-major cells.
    ///
    /// # Panics
    /// Panics if `cells.len() != size * size`.
    pub fn from_cells(size: usize, cells: Vec<f32>) -> Self {
        assert_eq!(
            cells.len(),
            size * size,
            "grid of side {size} needs {} cells",
            size * size
        );
        Self { size, cells }
    }

    /// Stamp `seeds` into an otherwise-zero grid.
    pub fn from_seeds(seeds: &SeedSet, size: usize) -> Self {
        Self {
            size,
            cells: seeds.generate(size),
        }
    }

    /// Side length N.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (N²).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Convert (x, y) coordinates to flat index.
    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    /// Get value at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.cells[self.idx(x, y)]
    }

    /// Set value at (x, y).
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        let idx = self.idx(x, y);
        self.cells[idx] = value;
    }

    /// Row-major cell slice.
    #[inline]
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    /// One row of the grid.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        &self.cells[y * self.size..(y + 1) * self.size]
    }

    /// Iterate `((x, y), value)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = ((usize, usize), f32)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &v)| ((i % self.size, i / self.size), v))
    }
}

/// The single live field: grid, parameters, seeds and simulated time.
///
/// The grid is replaced wholesale on every [`FieldStore::advance`], so
/// borrowers of [`FieldStore::grid`] always see a fully computed tick.
#[derive(Debug, Clone)]
pub struct FieldStore {
    params: SimulationParams,
    seeds: SeedSet,
    grid: Grid,
    /// Current simulated time.
    time: f32,
    /// Step count since the last (re)initialization.
    step: u64,
}

impl FieldStore {
    /// Create a store and stamp the initial grid.
    ///
    /// `params` and `seeds` are assumed validated; see [`SimulationParams::validate`]
    /// and [`SeedSet::validate`].
    pub fn new(params: SimulationParams, seeds: SeedSet) -> Self {
        debug_assert!(params.validate().is_ok(), "invalid params: {params:?}");
        debug_assert!(seeds.validate().is_ok(), "invalid seeds: {seeds:?}");
        let grid = Self::initialize(&params, &seeds);
        Self {
            params,
            seeds,
            grid,
            time: 0.0,
            step: 0,
        }
    }

    /// Produce a fresh seed-stamped grid for `params`.
    pub fn initialize(params: &SimulationParams, seeds: &SeedSet) -> Grid {
        log::debug!(
            "Initializing {}x{} grid with {} seeds",
            params.grid_size,
            params.grid_size,
            seeds.seeds.len()
        );
        Grid::from_seeds(seeds, params.grid_size)
    }

    /// Discard the current grid, re-stamp the seeds and rewind time to zero.
    pub fn reset(&mut self) {
        self.grid = Self::initialize(&self.params, &self.seeds);
        self.time = 0.0;
        self.step = 0;
    }

    /// Replace parameters. A grid size change reinitializes the field.
    pub fn set_params(&mut self, params: SimulationParams) {
        let resized = params.grid_size != self.params.grid_size;
        self.params = params;
        if resized {
            log::debug!("Grid size changed to {}, reinitializing", params.grid_size);
            self.reset();
        }
    }

    /// Replace the seed set. Takes effect on the next reset.
    pub fn set_seeds(&mut self, seeds: SeedSet) {
        self.seeds = seeds;
    }

    /// Advance by one tick, handing the previous grid to the stepper by reference
    /// and swapping in the grid it returns.
    pub fn advance(&mut self) -> &Grid {
        self.grid = step_grid(&self.grid, &self.params);
        self.time += DT;
        self.step += 1;
        &self.grid
    }

    /// Run the store forward `steps` ticks.
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.advance();
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn seeds(&self) -> &SeedSet {
        &self.seeds
    }

    /// Simulated time since the last (re)initialization.
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn step_count(&self) -> u64 {
        self.step
    }
}
