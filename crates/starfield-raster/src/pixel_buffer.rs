//! CPU pixel buffer implementing [`DrawSurface`], stored as straight-alpha
//! RGBA f32 and converted to RGBA8 on export.
//!
//! Blending assumes an opaque backdrop, which holds because every frame
//! starts with a background fill. Circles drawn onto transparent pixels come
//! out darkened.

use starfield_sim::{DrawSurface, Rgba};

/// A software canvas.
///
/// Fill color and global alpha are sticky, as on a 2D canvas context. Circles
/// are source-over blended; background fills overwrite.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 4]>,
    fill_color: Rgba,
    global_alpha: f32,
}

impl PixelBuffer {
    /// Create a transparent buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 4]; (width as usize) * (height as usize)],
            fill_color: Rgba::BLACK,
            global_alpha: 1.0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn global_alpha(&self) -> f32 {
        self.global_alpha
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    /// Number of pixels with any non-zero color channel.
    pub fn lit_pixel_count(&self) -> usize {
        self.pixels
            .iter()
            .filter(|p| p[0] > 0.0 || p[1] > 0.0 || p[2] > 0.0)
            .count()
    }

    /// Blend this buffer at `opacity` over a solid `backdrop`.
    ///
    /// Produces what the page shows when the starfield layer sits on top of
    /// its fallback background with reduced layer opacity.
    pub fn composite_over(&self, backdrop: Rgba, opacity: f32) -> PixelBuffer {
        let opacity = opacity.clamp(0.0, 1.0);
        let base = [backdrop.r, backdrop.g, backdrop.b, backdrop.a];
        let pixels = self
            .pixels
            .iter()
            .map(|src| {
                let a = src[3] * opacity;
                let mut out = [0.0; 4];
                for c in 0..3 {
                    out[c] = src[c] * a + base[c] * (1.0 - a);
                }
                out[3] = a + base[3] * (1.0 - a);
                out
            })
            .collect();

        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels,
            fill_color: self.fill_color,
            global_alpha: 1.0,
        }
    }

    /// Convert to tightly packed RGBA8 rows suitable for image encoders.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            for channel in pixel {
                bytes.push((channel.clamp(0.0, 1.0) * 255.0).round() as u8);
            }
        }
        bytes
    }

    /// Source-over onto an opaque destination.
    fn blend(&mut self, idx: usize, color: Rgba, alpha: f32) {
        let dst = &mut self.pixels[idx];
        let src = [color.r, color.g, color.b];
        for c in 0..3 {
            dst[c] = src[c] * alpha + dst[c] * (1.0 - alpha);
        }
        dst[3] = alpha + dst[3] * (1.0 - alpha);
    }
}

impl DrawSurface for PixelBuffer {
    fn resize_buffer(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 4]; (width as usize) * (height as usize)];
    }

    fn fill_background(&mut self, color: Rgba) {
        self.pixels.fill([color.r, color.g, color.b, color.a]);
    }

    fn set_fill_color(&mut self, color: Rgba) {
        self.fill_color = color;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        if radius <= 0.0 || self.width == 0 || self.height == 0 {
            return;
        }
        let alpha = self.fill_color.a * self.global_alpha;
        if alpha <= 0.0 {
            return;
        }

        let min_x = (x - radius).floor().max(0.0) as u32;
        let min_y = (y - radius).floor().max(0.0) as u32;
        let max_x = ((x + radius).ceil() as u32).min(self.width - 1);
        let max_y = ((y + radius).ceil() as u32).min(self.height - 1);
        let r2 = radius * radius;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                // Sample at the pixel center.
                let dx = px as f32 + 0.5 - x;
                let dy = py as f32 + 0.5 - y;
                if dx * dx + dy * dy <= r2 {
                    let idx = (py * self.width + px) as usize;
                    self.blend(idx, self.fill_color, alpha);
                }
            }
        }
    }
}
