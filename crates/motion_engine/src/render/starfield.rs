//! Starfield drawing

use crate::entities::star::Star;
use crate::foundation::math::Rgba;
use crate::physics::starfield::{project, StarMotion};
use crate::render::Surface;

/// Clear `surface` to `background` and draw every visible star.
///
/// `width` and `height` are the viewport the stars are projected into.
/// Returns the number of stars drawn.
pub fn render_starfield<S: Surface + ?Sized>(
    surface: &mut S,
    stars: &[Star],
    motion: &StarMotion,
    background: Rgba,
    (width, height): (f32, f32),
    time_ms: f64,
) -> usize {
    surface.clear(background);

    let mut drawn = 0;
    for star in stars {
        if let Some(p) = project(star, width, height, motion, time_ms) {
            surface.fill_circle(p.screen, p.size, star.color.with_alpha(p.opacity));
            drawn += 1;
        }
    }
    drawn
}
