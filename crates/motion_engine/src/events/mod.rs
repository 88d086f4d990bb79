//! Interaction and notification events
//!
//! The host sends [`InteractionEvent`]s into a scene and drains the
//! [`EngineEvent`]s each controller queues up while it runs. Notifications
//! are buffered, never delivered through callbacks, so a controller is never
//! re-entered while it mutates its state.

use crate::core::viewport::Viewport;
use crate::entities::bubble::BubbleId;
use crate::foundation::math::Vec2;

/// Input forwarded by the host
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// Pointer entered a bubble
    HoverEnter(BubbleId),
    /// Pointer left a bubble
    HoverLeave(BubbleId),
    /// A bubble was clicked or activated from the keyboard
    Click(BubbleId),
    /// Pointer moved to a position in window pixels
    PointerMoved(Vec2),
    /// Pointer left the window
    PointerLeft,
}

impl InteractionEvent {
    /// Bubble the event targets, if any
    pub fn target(&self) -> Option<&BubbleId> {
        match self {
            Self::HoverEnter(id) | Self::HoverLeave(id) | Self::Click(id) => Some(id),
            Self::PointerMoved(_) | Self::PointerLeft => None,
        }
    }
}

/// Which effect emitted a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Depth-parallax starfield
    Starfield,
    /// Skill bubble cloud
    BubbleCloud,
}

/// Notification queued by a controller
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A fresh entity set was seeded
    Seeded {
        /// Emitting effect
        effect: EffectKind,
        /// Entities in the new set
        count: usize,
    },
    /// A bubble was popped
    Popped {
        /// Popped bubble
        id: BubbleId,
        /// Pops including this one
        pop_count: u32,
    },
    /// A popped bubble came back
    Respawned {
        /// Respawned bubble
        id: BubbleId,
    },
    /// The host reported a new viewport
    Resized {
        /// Emitting effect
        effect: EffectKind,
        /// New measurement
        viewport: Viewport,
    },
    /// The controller was unmounted
    Disposed {
        /// Emitting effect
        effect: EffectKind,
    },
}
