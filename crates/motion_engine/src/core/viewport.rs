//! Host measurements of the drawing area

use serde::{Deserialize, Serialize};

/// Size of the container an effect is mounted into, in pixels
///
/// `window_width` is the width of the whole window; bubble radii are given in
/// window-width units and converted with it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Container width
    pub width: f32,
    /// Container height
    pub height: f32,
    /// Window width
    pub window_width: f32,
}

impl Viewport {
    /// Container filling the whole window
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            window_width: width,
        }
    }

    /// Set the window width
    pub fn with_window_width(mut self, window_width: f32) -> Self {
        self.window_width = window_width;
        self
    }

    /// Both sides are positive
    pub fn is_measurable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Far plane of the starfield, the larger side
    pub fn max_depth(&self) -> f32 {
        self.width.max(self.height)
    }

    /// Convert a window-width radius to percent of the container width
    pub fn vw_radius_to_percent(&self, radius_vw: f32) -> f32 {
        if self.width <= 0.0 {
            return radius_vw / 2.0;
        }
        radius_vw * self.window_width / self.width / 2.0
    }
}
