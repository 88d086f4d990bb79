//! Starfield particles

use std::fmt;

use crate::entities::store::Entity;
use crate::foundation::math::{Rgba, Vec2};

/// Index of a star within its field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StarId(pub u32);

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "star-{}", self.0)
    }
}

/// A single star
///
/// `position` is normalized to `[-1, 1]` on both axes and `depth` is the
/// distance from the viewer in pixels, always in `(0, max_depth]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Identifier
    pub id: StarId,
    /// Normalized planar position
    pub position: Vec2,
    /// Distance from the viewer
    pub depth: f32,
    /// Radius at zero depth
    pub base_size: f32,
    /// Opacity before twinkling
    pub base_opacity: f32,
    /// Fill color
    pub color: Rgba,
    /// Twinkle angular speed per millisecond
    pub twinkle_speed: f32,
    /// Twinkle phase offset in radians
    pub twinkle_phase: f32,
}

impl Entity for Star {
    type Id = StarId;

    fn id(&self) -> &StarId {
        &self.id
    }
}
