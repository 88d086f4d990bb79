//! # Rendering System
//!
//! Surface adapters the controllers draw into once per tick.
//!
//! ## Architecture
//!
//! - **Surface**: immediate-mode 2D target with a clear and a filled circle
//! - **RasterSurface**: CPU raster backed by an RGBA image, exportable as PNG
//! - **CommandRecorder**: records draw commands instead of rasterizing them
//! - **Bubble layout**: turns bubbles into positioned circular elements for a
//!   [`BubbleSurface`]
//!
//! Surfaces never fail while drawing; colors are validated when the
//! configuration is loaded.

pub mod bubbles;
pub mod raster;
pub mod recorder;
pub mod starfield;

use crate::foundation::math::{Rgba, Vec2};

pub use bubbles::{draw_bubbles, layout_bubbles, BubbleElement, BubbleSurface, ElementLog, Tooltip};
pub use raster::RasterSurface;
pub use recorder::CommandRecorder;
pub use starfield::render_starfield;

/// A single drawing operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear(Rgba),
    /// Filled circle in pixel coordinates
    Circle {
        /// Center
        center: Vec2,
        /// Radius
        radius: f32,
        /// Fill color, alpha included
        color: Rgba,
    },
}

/// Immediate-mode 2D drawing target
pub trait Surface {
    /// Size in pixels
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface with `color`
    fn clear(&mut self, color: Rgba);

    /// Draw a filled circle blended over the current content
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    /// Replay a recorded command
    fn draw(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::Clear(color) => self.clear(color),
            DrawCommand::Circle { center, radius, color } => self.fill_circle(center, radius, color),
        }
    }
}
