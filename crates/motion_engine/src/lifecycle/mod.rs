//! Lifecycle controllers
//!
//! One controller per mounted effect. Each owns its entity store, its
//! deferred tasks and its frame request, and walks the same state machine:
//!
//! ```text
//! Uninitialized -> Seeding -> Running -> (Resizing -> Seeding -> Running)* -> Disposed
//! ```
//!
//! After `unmount` every operation fails with [`EngineError::Disposed`].

pub mod bubble_cloud;
pub mod scheduler;
pub mod starfield;

use crate::engine::EngineError;

pub use bubble_cloud::{BubbleCloud, PopOutcome};
pub use scheduler::{FrameRequest, TaskId, TaskQueue};
pub use starfield::Starfield;

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    /// Constructed, not mounted yet
    #[default]
    Uninitialized,
    /// Building the entity set
    Seeding,
    /// Ticking
    Running,
    /// Handling a new viewport
    Resizing,
    /// Unmounted; terminal
    Disposed,
}

impl LifecycleState {
    /// Fail with [`EngineError::Disposed`] once unmounted
    pub fn ensure_live(self) -> Result<(), EngineError> {
        match self {
            Self::Disposed => Err(EngineError::Disposed),
            _ => Ok(()),
        }
    }
}

/// Result of one `frame` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameOutcome {
    /// Simulated and drawn
    Rendered,
    /// Viewport has no area yet; the next frame is still requested
    Skipped,
    /// Not mounted or no frame requested; nothing happened
    NotRunning,
}
