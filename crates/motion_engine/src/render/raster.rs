//! CPU raster surface
//!
//! Circles are rasterized by testing pixel centers against the radius and
//! blended with straight alpha. Circles smaller than a pixel still show up:
//! they tint the pixel under their center, weighted by their area.

use std::path::Path;

use image::{ImageFormat, Rgba as Pixel, RgbaImage};

use crate::engine::EngineError;
use crate::foundation::math::{constants::PI, Rgba, Vec2};
use crate::render::Surface;

/// RGBA image surface
#[derive(Debug, Clone)]
pub struct RasterSurface {
    image: RgbaImage,
}

impl RasterSurface {
    /// Create a transparent surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Underlying image
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Channels of one pixel, `None` outside the surface
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Resize to a new viewport, discarding the content
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.image.dimensions() != (width, height) {
            self.image = RgbaImage::new(width, height);
        }
    }

    /// Write the current content as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), EngineError> {
        let path = path.as_ref();
        self.image
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| EngineError::Render(format!("{}: {e}", path.display())))
    }

    fn blend(&mut self, x: u32, y: u32, color: Rgba, alpha: f32) {
        let Some(pixel) = self.image.get_pixel_mut_checked(x, y) else {
            return;
        };
        let a = alpha.clamp(0.0, 1.0);
        let [dr, dg, db, da] = pixel.0;
        let mix = |src: u8, dst: u8| (f32::from(src) * a + f32::from(dst) * (1.0 - a)).round() as u8;
        let out_alpha = (255.0 * a + f32::from(da) * (1.0 - a)).round() as u8;
        *pixel = Pixel([mix(color.r, dr), mix(color.g, dg), mix(color.b, db), out_alpha]);
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    fn clear(&mut self, color: Rgba) {
        let alpha = (color.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        let fill = Pixel([color.r, color.g, color.b, alpha]);
        for pixel in self.image.pixels_mut() {
            *pixel = fill;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let (width, height) = self.image.dimensions();
        if radius <= 0.0 || color.a <= 0.0 || width == 0 || height == 0 {
            return;
        }

        if radius < 1.0 {
            let (x, y) = (center.x.floor(), center.y.floor());
            if x >= 0.0 && y >= 0.0 {
                let coverage = (PI * radius * radius).min(1.0);
                self.blend(x as u32, y as u32, color, color.a * coverage);
            }
            return;
        }

        let min_x = (center.x - radius).floor().max(0.0) as u32;
        let min_y = (center.y - radius).floor().max(0.0) as u32;
        let max_x = ((center.x + radius).ceil().max(0.0) as u32).min(width - 1);
        let max_y = ((center.y + radius).ceil().max(0.0) as u32).min(height - 1);
        let radius_sq = radius * radius;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let offset = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if offset.norm_squared() <= radius_sq {
                    self.blend(x, y, color, color.a);
                }
            }
        }
    }
}
