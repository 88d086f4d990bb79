//! Bubble cloud physics step
//!
//! One call moves every active bubble by its velocity, reflects it off the
//! padded walls and resolves overlapping pairs. The step is not time-scaled:
//! velocity is a displacement per tick.
//!
//! Pair resolution is the simplified equal-mass rule: both bubbles are pushed
//! apart by half the overlap along the center line and their velocity vectors
//! are swapped. Pairs are visited in `(i, j)` order with `i < j`; clusters of
//! three or more settle over several ticks.

use crate::entities::bubble::{Bubble, BubbleFlags};
use crate::foundation::math::utils::clamp_span;
use crate::physics::collision::BoundingCircle;

/// The square a cloud lives in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudBounds {
    /// Side length, 100 for percent space
    pub extent: f32,
    /// Distance kept from every wall
    pub padding: f32,
}

impl CloudBounds {
    /// Percent space with the given padding
    pub fn percent(padding: f32) -> Self {
        Self {
            extent: 100.0,
            padding,
        }
    }
}

/// What happened during one step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Bubbles that hit a wall
    pub wall_hits: usize,
    /// Overlapping pairs that were separated
    pub pair_hits: usize,
}

/// Advance the cloud by one tick
pub fn step_bubbles(bubbles: &mut [Bubble], bounds: &CloudBounds) -> StepReport {
    let mut report = StepReport::default();

    for bubble in bubbles.iter_mut() {
        bubble.flags.remove(BubbleFlags::COLLIDING);
    }

    for bubble in bubbles.iter_mut().filter(|b| !b.is_popping()) {
        bubble.position += bubble.velocity;
        if reflect_off_walls(bubble, bounds) {
            bubble.flags.insert(BubbleFlags::COLLIDING);
            report.wall_hits += 1;
        }
    }

    for i in 0..bubbles.len() {
        let (head, tail) = bubbles.split_at_mut(i + 1);
        let first = &mut head[i];
        if first.is_popping() {
            continue;
        }
        for second in tail.iter_mut().filter(|b| !b.is_popping()) {
            if resolve_pair(first, second) {
                report.pair_hits += 1;
            }
        }
    }

    // Pushes can move a center past a wall; keep it inside the padded square
    let (lo, hi) = (bounds.padding, bounds.extent - bounds.padding);
    for bubble in bubbles.iter_mut().filter(|b| !b.is_popping()) {
        bubble.position.x = clamp_span(bubble.position.x, lo, hi);
        bubble.position.y = clamp_span(bubble.position.y, lo, hi);
    }

    report
}

/// Reflect the velocity component normal to any wall the bubble crossed and
/// clamp it back inside. Returns `true` on a hit.
pub fn reflect_off_walls(bubble: &mut Bubble, bounds: &CloudBounds) -> bool {
    let lo = bounds.padding + bubble.radius;
    let hi = bounds.extent - bounds.padding - bubble.radius;
    let mut hit = false;

    for axis in 0..2 {
        let p = bubble.position[axis];
        if p < lo || p > hi {
            bubble.velocity[axis] = -bubble.velocity[axis];
            bubble.position[axis] = clamp_span(p, lo, hi);
            hit = true;
        }
    }
    hit
}

/// Separate two overlapping bubbles and swap their velocities.
/// Returns `true` if they overlapped.
pub fn resolve_pair(a: &mut Bubble, b: &mut Bubble) -> bool {
    let circle_a = BoundingCircle::new(a.position, a.radius);
    let circle_b = BoundingCircle::new(b.position, b.radius);
    let Some(contact) = circle_a.contact(&circle_b) else {
        return false;
    };

    let adjust = contact.normal * (contact.penetration * 0.5);
    a.position -= adjust;
    b.position += adjust;
    std::mem::swap(&mut a.velocity, &mut b.velocity);
    a.flags.insert(BubbleFlags::COLLIDING);
    b.flags.insert(BubbleFlags::COLLIDING);
    true
}
