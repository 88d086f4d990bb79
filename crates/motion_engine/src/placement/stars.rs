//! Star seeding

use rand::seq::SliceRandom;
use rand::Rng;

use crate::entities::star::{Star, StarId};
use crate::foundation::math::{constants::TAU, Rgba, Vec2};

/// Random depth in `(0, max_depth]`
pub(crate) fn sample_depth<R: Rng + ?Sized>(rng: &mut R, max_depth: f32) -> f32 {
    // gen() is in [0, 1), so 1 - gen() is in (0, 1]
    max_depth * (1.0 - rng.gen::<f32>())
}

/// Random normalized planar position in `[-1, 1]²`
pub(crate) fn sample_plane<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0))
}

/// Seed `count` stars, sorted nearest first.
///
/// Ids follow the sorted order so the store order matches the id order.
pub fn seed_stars<R: Rng + ?Sized>(
    count: usize,
    max_depth: f32,
    palette: &[Rgba],
    rng: &mut R,
) -> Vec<Star> {
    let mut stars: Vec<Star> = (0..count)
        .map(|_| Star {
            id: StarId(0),
            position: sample_plane(rng),
            depth: sample_depth(rng, max_depth),
            base_size: rng.gen_range(0.5..2.0),
            base_opacity: rng.gen_range(0.5..1.0),
            color: palette.choose(rng).copied().unwrap_or(Rgba::WHITE),
            twinkle_speed: rng.gen_range(0.01..0.04),
            twinkle_phase: rng.gen_range(0.0..TAU),
        })
        .collect();

    stars.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    for (index, star) in stars.iter_mut().enumerate() {
        star.id = StarId(index as u32);
    }
    stars
}
