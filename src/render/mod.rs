//! Render module - Heat-map painting of density grids.
//!
//! The renderer consumes an immutable grid snapshot and paints one filled
//! rectangle per cell onto a host-owned [`RasterTarget`]. It never reads
//! the surface back and never touches simulation state.

mod colormap;
mod raster;

pub use colormap::*;
pub use raster::*;

use crate::compute::Grid;

/// Grid-to-surface painter.
#[derive(Debug, Default)]
pub struct Renderer {
    /// Pre-allocated colour buffer (reused each frame).
    colors: Vec<Rgb>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `grid` onto `target`, one `width/N × height/N` rectangle per cell.
    ///
    /// Returns `false` without doing anything when no target is attached.
    pub fn paint(&mut self, grid: &Grid, target: Option<&mut dyn RasterTarget>) -> bool {
        let Some(target) = target else {
            return false;
        };
        let size = grid.size();
        if size == 0 {
            return false;
        }

        self.colors.resize(grid.len(), (0, 0, 0));
        map_colors_into(grid.cells(), &mut self.colors);

        let cell_w = target.width() as f32 / size as f32;
        let cell_h = target.height() as f32 / size as f32;

        for (i, &color) in self.colors.iter().enumerate() {
            let x = (i % size) as f32 * cell_w;
            let y = (i / size) as f32 * cell_h;
            target.fill_rect(x, y, cell_w, cell_h, color);
        }
        true
    }
}
