//! Skill bubbles
//!
//! Positions and radii are percentages of the container. The radius is fixed
//! at creation; only position, velocity and the visual state change.

use std::fmt;

use bitflags::bitflags;

use crate::core::config::SkillEntry;
use crate::entities::store::Entity;
use crate::foundation::math::Vec2;
use crate::lifecycle::scheduler::TaskId;

/// Stable bubble identifier, `skill-{index}-{name}`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BubbleId(String);

impl BubbleId {
    /// Identifier for the skill at `index` of the skill list
    pub fn for_skill(index: usize, skill: &SkillEntry) -> Self {
        Self(format!("skill-{index}-{}", skill.name))
    }

    /// Underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BubbleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags! {
    /// Visual state of a bubble
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BubbleFlags: u8 {
        /// Touched a wall or another bubble this tick
        const COLLIDING = 1 << 0;
        /// Pointer is over the bubble
        const HOVERED   = 1 << 1;
        /// Popped and waiting for its respawn
        const POPPING   = 1 << 2;
    }
}

/// A skill bubble
#[derive(Debug, Clone, PartialEq)]
pub struct Bubble {
    /// Identifier
    pub id: BubbleId,
    /// Skill shown inside the bubble
    pub skill: SkillEntry,
    /// Center in container percent
    pub position: Vec2,
    /// Displacement per tick in container percent
    pub velocity: Vec2,
    /// Radius in container percent
    pub radius: f32,
    /// Visual state
    pub flags: BubbleFlags,
    /// Scale the element animates towards
    pub target_scale: f32,
    /// How many times this bubble was popped
    pub pop_count: u32,
    /// Ticket of the pending respawn, if any
    pub respawn: Option<TaskId>,
}

impl Bubble {
    /// Create a bubble at rest at full scale
    pub fn new(id: BubbleId, skill: SkillEntry, position: Vec2, radius: f32) -> Self {
        Self {
            id,
            skill,
            position,
            velocity: Vec2::zeros(),
            radius,
            flags: BubbleFlags::empty(),
            target_scale: 1.0,
            pop_count: 0,
            respawn: None,
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Start scaled down, waiting for the entrance animation
    pub fn hidden(mut self) -> Self {
        self.target_scale = 0.0;
        self
    }

    /// Collided this tick
    pub fn is_colliding(&self) -> bool {
        self.flags.contains(BubbleFlags::COLLIDING)
    }

    /// Pointer is over it
    pub fn is_hovered(&self) -> bool {
        self.flags.contains(BubbleFlags::HOVERED)
    }

    /// Popped and waiting for a respawn
    pub fn is_popping(&self) -> bool {
        self.flags.contains(BubbleFlags::POPPING)
    }

    /// Screen reader label
    pub fn accessible_label(&self) -> String {
        format!("{} skill bubble, popped {} times", self.skill.name, self.pop_count)
    }
}

impl Entity for Bubble {
    type Id = BubbleId;

    fn id(&self) -> &BubbleId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_and_label() {
        let skill = SkillEntry::new("React", 90, "frontend");
        let mut bubble = Bubble::new(BubbleId::for_skill(0, &skill), skill, Vec2::new(50.0, 50.0), 4.0);
        assert_eq!(bubble.id.as_str(), "skill-0-React");

        bubble.pop_count = 3;
        assert_eq!(bubble.accessible_label(), "React skill bubble, popped 3 times");
    }

    #[test]
    fn test_flags() {
        let skill = SkillEntry::new("Git", 85, "tools");
        let mut bubble = Bubble::new(BubbleId::for_skill(9, &skill), skill, Vec2::zeros(), 3.0).hidden();
        assert!(!bubble.is_popping());
        assert_eq!(bubble.target_scale, 0.0);

        bubble.flags.insert(BubbleFlags::POPPING | BubbleFlags::COLLIDING);
        assert!(bubble.is_popping() && bubble.is_colliding() && !bubble.is_hovered());
    }
}
