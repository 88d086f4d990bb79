//! Starfield motion and projection
//!
//! Stars fly towards the viewer at a constant depth speed per tick and are
//! projected with a simple pinhole model:
//!
//! ```text
//! perspective = fov / (fov + depth)
//! screen_x    = x * (width / 2) * perspective + width / 2
//! size        = base_size * perspective
//! ```
//!
//! Twinkling modulates opacity around the base value using the wall-clock
//! time handed to the frame, not the tick count.

use rand::Rng;

use crate::entities::star::Star;
use crate::foundation::math::Vec2;
use crate::placement::stars::sample_plane;

/// Tuning shared by every star of a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarMotion {
    /// Depth lost per tick
    pub base_speed: f32,
    /// Projection distance
    pub fov: f32,
    /// Oscillating share of the base opacity
    pub twinkle_intensity: f32,
}

/// Where and how a star is drawn this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Screen position in pixels
    pub screen: Vec2,
    /// Radius in pixels
    pub size: f32,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
}

/// Move a star one tick closer. Returns `true` when it was recycled.
///
/// A star reaching depth zero goes back to `max_depth` with a new planar
/// position; color, size and twinkle survive.
pub fn advance_star<R: Rng + ?Sized>(star: &mut Star, base_speed: f32, max_depth: f32, rng: &mut R) -> bool {
    star.depth -= base_speed;
    if star.depth <= 0.0 {
        star.depth = max_depth;
        star.position = sample_plane(rng);
        return true;
    }
    // A shrunken viewport can leave stars beyond the new far plane until reseed
    star.depth = star.depth.min(max_depth);
    false
}

/// Advance every star. Returns the number of recycled stars.
pub fn step_starfield<R: Rng + ?Sized>(stars: &mut [Star], base_speed: f32, max_depth: f32, rng: &mut R) -> usize {
    stars
        .iter_mut()
        .map(|star| advance_star(star, base_speed, max_depth, rng))
        .filter(|&recycled| recycled)
        .count()
}

/// Perspective factor for a depth
pub fn perspective(fov: f32, depth: f32) -> f32 {
    fov / (fov + depth)
}

/// Twinkling opacity at `time_ms`
pub fn twinkle_opacity(star: &Star, time_ms: f64, intensity: f32) -> f32 {
    let angle = time_ms * f64::from(star.twinkle_speed) + f64::from(star.twinkle_phase);
    let wave = ((angle.sin() + 1.0) * 0.5) as f32;
    star.base_opacity * (1.0 - intensity + intensity * wave)
}

/// Project a star onto a `width × height` surface.
///
/// Returns `None` when the star falls outside the surface or would be
/// invisible; such stars are skipped for the tick, never removed.
pub fn project(star: &Star, width: f32, height: f32, motion: &StarMotion, time_ms: f64) -> Option<Projection> {
    let center = Vec2::new(width * 0.5, height * 0.5);
    let factor = perspective(motion.fov, star.depth);
    let screen = star.position.component_mul(&center) * factor + center;
    let size = star.base_size * factor;
    let opacity = twinkle_opacity(star, time_ms, motion.twinkle_intensity);

    let on_surface = (0.0..=width).contains(&screen.x) && (0.0..=height).contains(&screen.y);
    (on_surface && size > 0.0 && opacity > 0.0).then_some(Projection { screen, size, opacity })
}
