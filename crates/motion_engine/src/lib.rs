//! # Motion Engine
//!
//! A single-threaded motion engine for decorative visual effects.
//!
//! ## Features
//!
//! - **Starfield**: depth-parallax particles with perspective projection and twinkling
//! - **Skill Bubble Cloud**: labelled bubbles with wall reflection, pairwise collision,
//!   hover and pop-to-respawn interaction
//! - **Surfaces**: CPU raster with PNG export, command recording, bubble element layout
//! - **Lifecycle**: mount/frame/resize/unmount controllers with cancellable deferred tasks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use motion_engine::prelude::*;
//!
//! fn main() -> Result<(), EngineError> {
//!     let mut config = SceneConfig::default();
//!     config.skills.push(SkillEntry::new("Rust", 90, "backend"));
//!
//!     let mut scene = SkillScene::new(config)?;
//!     let mut surface = RasterSurface::new(800, 600);
//!     scene.mount(Viewport::new(800.0, 600.0), 0.0)?;
//!
//!     for tick in 1..=60 {
//!         scene.frame(f64::from(tick) * 16.0, &mut surface)?;
//!     }
//!     surface.save_png("frame.png")?;
//!     scene.unmount()
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;
pub mod foundation;

// Simulation
pub mod entities;
pub mod placement;
pub mod physics;

// Output and control
pub mod render;
pub mod lifecycle;
pub mod events;

mod engine;

#[cfg(test)]
mod tests;

pub use engine::{EngineError, SceneFrame, SkillScene};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        EngineError, SceneFrame, SkillScene,
        core::{
            BubbleCloudConfig, Config, ConfigError, EngineConfig, SceneConfig, SkillEntry,
            StarfieldConfig, Viewport,
        },
        entities::{Bubble, BubbleFlags, BubbleId, Star, StarId},
        events::{EffectKind, EngineEvent, InteractionEvent},
        foundation::{
            math::{Rgba, Vec2},
            time::{Clock, FrameClock, ManualClock, SystemClock},
        },
        lifecycle::{BubbleCloud, FrameOutcome, LifecycleState, PopOutcome, Starfield},
        render::{BubbleSurface, CommandRecorder, ElementLog, RasterSurface, Surface},
    };
}
