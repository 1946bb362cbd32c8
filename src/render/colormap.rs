//! Density-to-colour heat ramp.
//!
//! Blue (low) → cyan → green → yellow → red (high), one linear segment per
//! quarter of unit density. Densities at or above 1 saturate to red.

/// 8-bit RGB triple.
pub type Rgb = (u8, u8, u8);

/// Density spanned by one segment of the ramp.
pub const SEGMENT_WIDTH: f32 = 0.25;

/// Ramp stops, low to high.
pub const RAMP_STOPS: [Rgb; 5] = [
    (0, 0, 255),
    (0, 255, 255),
    (0, 255, 0),
    (255, 255, 0),
    (255, 0, 0),
];

/// Scale a unit fraction to a channel value, truncating like `floor`.
#[inline]
fn channel(t: f32) -> u8 {
    (t.clamp(0.0, 1.0) * 255.0) as u8
}

/// Map a density to its heat-ramp colour.
///
/// The input is not pre-clamped: anything ≥ 1 lands on the last segment
/// with its fraction capped, producing saturated red.
pub fn color_of(density: f32) -> Rgb {
    if density < SEGMENT_WIDTH {
        let t = density / SEGMENT_WIDTH;
        (0, channel(t), 255)
    } else if density < 2.0 * SEGMENT_WIDTH {
        let t = (density - SEGMENT_WIDTH) / SEGMENT_WIDTH;
        (0, 255, channel(1.0 - t))
    } else if density < 3.0 * SEGMENT_WIDTH {
        let t = (density - 2.0 * SEGMENT_WIDTH) / SEGMENT_WIDTH;
        (channel(t), 255, 0)
    } else {
        let t = (density - 3.0 * SEGMENT_WIDTH) / SEGMENT_WIDTH;
        (255, channel(1.0 - t), 0)
    }
}

/// Map every cell of a row-major slice into `out`.
pub fn map_colors_into(cells: &[f32], out: &mut [Rgb]) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rayon::prelude::*;

        out.par_iter_mut()
            .zip(cells.par_iter())
            .for_each(|(c, &d)| *c = color_of(d));
    }

    #[cfg(target_arch = "wasm32")]
    {
        for (c, &d) in out.iter_mut().zip(cells.iter()) {
            *c = color_of(d);
        }
    }
}
