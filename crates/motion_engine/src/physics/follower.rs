//! Eased pointer follower
//!
//! A glow that trails the pointer: every tick it closes a fixed fraction of
//! the remaining gap. It keeps moving while the pointer moved recently or
//! while it is still visibly behind, and hides when the pointer leaves.

use crate::foundation::math::Vec2;

/// Pointer moves newer than this keep the follower active
const MOVE_IDLE_MS: f64 = 100.0;

/// Gap per axis below which a resting follower stops updating
const SETTLE_PX: f32 = 0.1;

/// Eased follower state
#[derive(Debug, Clone, PartialEq)]
pub struct CursorFollower {
    position: Vec2,
    target: Vec2,
    easing: f32,
    visible: bool,
    last_move_ms: Option<f64>,
}

impl CursorFollower {
    /// Create a hidden follower closing `easing` of the gap per tick
    pub fn new(easing: f32) -> Self {
        Self {
            position: Vec2::zeros(),
            target: Vec2::zeros(),
            easing: easing.clamp(0.0, 1.0),
            visible: false,
            last_move_ms: None,
        }
    }

    /// Current eased position
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Whether the pointer is over the page
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Pointer moved to `(x, y)` at `now_ms`
    pub fn pointer_moved(&mut self, target: Vec2, now_ms: f64) {
        self.target = target;
        self.visible = true;
        self.last_move_ms = Some(now_ms);
    }

    /// Pointer left the page
    pub fn pointer_left(&mut self) {
        self.visible = false;
    }

    /// Ease towards the pointer. Returns `true` if the position changed.
    pub fn step(&mut self, now_ms: f64) -> bool {
        let moving = self
            .last_move_ms
            .is_some_and(|last| now_ms - last < MOVE_IDLE_MS);
        let gap = self.target - self.position;
        if !moving && gap.x.abs() <= SETTLE_PX && gap.y.abs() <= SETTLE_PX {
            return false;
        }

        self.position += gap * self.easing;
        true
    }
}

impl Default for CursorFollower {
    fn default() -> Self {
        Self::new(0.08)
    }
}

/// Offset that pulls an element towards the pointer, a tenth of the distance
/// from the element's center.
pub fn magnetic_offset(pointer: Vec2, element_center: Vec2) -> Vec2 {
    (pointer - element_center) / 10.0
}
