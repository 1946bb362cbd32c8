//! Raster targets the renderer paints into.

use super::Rgb;

/// A write-only 2-D raster surface of known pixel dimensions.
pub trait RasterTarget {
    /// Surface width in device pixels.
    fn width(&self) -> u32;

    /// Surface height in device pixels.
    fn height(&self) -> u32;

    /// Fill the axis-aligned rectangle starting at (x, y) with `color`.
    ///
    /// Coordinates are in device pixels and may be fractional; parts outside
    /// the surface are discarded.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb);
}

/// Rendering errors.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Canvas dimensions must be non-zero (got {width}x{height})")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

/// In-memory RGBA8 canvas, row-major, fully opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a black canvas.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        let mut data = vec![0u8; width as usize * height as usize * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Square canvas of side `size`.
    pub fn square(size: u32) -> Result<Self, RenderError> {
        Self::new(size, size)
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Colour of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        (self.data[i], self.data[i + 1], self.data[i + 2])
    }

    /// Convert to an `image` buffer for encoding.
    pub fn to_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            let (r, g, b) = self.pixel(x, y);
            image::Rgba([r, g, b, 255])
        })
    }

    /// Encode the canvas as a PNG file.
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), RenderError> {
        self.to_image().save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Snap a fractional span to whole pixels so adjacent spans tile without gaps.
#[inline]
fn pixel_span(start: f32, len: f32, limit: u32) -> (usize, usize) {
    let lo = start.round().max(0.0) as usize;
    let hi = ((start + len).round().max(0.0) as usize).min(limit as usize);
    (lo.min(hi), hi)
}

impl RasterTarget for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, (r, g, b): Rgb) {
        let (x0, x1) = pixel_span(x, w, self.width);
        let (y0, y1) = pixel_span(y, h, self.height);
        let stride = self.width as usize * 4;

        for row in y0..y1 {
            let line = &mut self.data[row * stride + x0 * 4..row * stride + x1 * 4];
            for px in line.chunks_exact_mut(4) {
                px[0] = r;
                px[1] = g;
                px[2] = b;
                px[3] = 255;
            }
        }
    }
}
