//! Randomized retry placement of non-overlapping circles
//!
//! Every circle gets a fixed number of attempts. Each attempt samples a fresh
//! radius and a center that keeps the whole circle inside the padded extent,
//! and is accepted once it keeps the separation distance to every circle
//! already placed. When they run out the circle lands in the center of
//! the extent instead, so the output always has the requested length.

use log::warn;
use rand::Rng;

use crate::foundation::math::Vec2;

/// Inputs of [`place_circles`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    /// Side length of the square placement space
    pub extent: f32,
    /// Distance every circle keeps from the walls
    pub padding: f32,
    /// Minimum center distance as a multiple of the summed radii
    pub separation_multiplier: f32,
    /// Attempts per circle before falling back to the center
    pub max_attempts: usize,
}

impl PlacementParams {
    /// Percent space (`extent = 100`) with `attempts_per_entity × count` attempts per circle
    pub fn percent(padding: f32, separation_multiplier: f32, attempts_per_entity: usize, count: usize) -> Self {
        Self {
            extent: 100.0,
            padding,
            separation_multiplier,
            max_attempts: attempts_per_entity.saturating_mul(count),
        }
    }
}

/// One placed circle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Center
    pub center: Vec2,
    /// Radius
    pub radius: f32,
    /// Placed at the center after every attempt failed
    pub fallback: bool,
}

/// Place `count` circles. Always returns exactly `count` placements.
pub fn place_circles<R, F>(
    count: usize,
    params: &PlacementParams,
    rng: &mut R,
    mut sample_radius: F,
) -> Vec<Placement>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> f32,
{
    let mut placed: Vec<Placement> = Vec::with_capacity(count);

    for index in 0..count {
        let accepted = (0..params.max_attempts).find_map(|_| {
            let radius = sample_radius(rng);
            let candidate = Vec2::new(
                sample_axis(rng, params, radius),
                sample_axis(rng, params, radius),
            );
            is_clear(&placed, candidate, radius, params.separation_multiplier).then_some(Placement {
                center: candidate,
                radius,
                fallback: false,
            })
        });

        let placement = accepted.unwrap_or_else(|| {
            warn!(
                "placement of circle {index} failed after {} attempts, using the center",
                params.max_attempts
            );
            let half = params.extent * 0.5;
            Placement {
                center: Vec2::new(half, half),
                radius: sample_radius(rng),
                fallback: true,
            }
        });
        placed.push(placement);
    }

    placed
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, params: &PlacementParams, radius: f32) -> f32 {
    let span = (params.extent - 2.0 * params.padding - 2.0 * radius).max(0.0);
    params.padding + radius + rng.gen::<f32>() * span
}

fn is_clear(placed: &[Placement], center: Vec2, radius: f32, multiplier: f32) -> bool {
    placed.iter().all(|other| {
        let min_distance = (radius + other.radius) * multiplier;
        (center - other.center).norm() >= min_distance
    })
}
