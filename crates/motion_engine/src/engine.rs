//! Scene composition and engine errors

use log::info;
use thiserror::Error;

use crate::core::config::{ConfigError, EngineConfig, SceneConfig};
use crate::core::viewport::Viewport;
use crate::entities::bubble::BubbleId;
use crate::events::{EngineEvent, InteractionEvent};
use crate::foundation::math::Vec2;
use crate::lifecycle::{BubbleCloud, FrameOutcome, Starfield};
use crate::physics::follower::{magnetic_offset, CursorFollower};
use crate::render::{BubbleSurface, Surface};

/// Easing of the pointer glow
const FOLLOWER_EASING: f32 = 0.08;

/// A skills section: a starfield behind a bubble cloud, plus the pointer glow
///
/// The scene owns one controller per effect and routes host input to them.
/// Both effects are drawn into the same surface, stars first.
#[derive(Debug)]
pub struct SkillScene {
    engine: EngineConfig,
    starfield: Starfield,
    bubbles: BubbleCloud,
    follower: CursorFollower,
}

/// Outcomes of one scene frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneFrame {
    /// Starfield outcome
    pub starfield: FrameOutcome,
    /// Bubble cloud outcome
    pub bubbles: FrameOutcome,
    /// Whether the pointer glow moved
    pub follower_moved: bool,
}

impl SkillScene {
    /// Build an unmounted scene, validating the whole configuration
    pub fn new(config: SceneConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let SceneConfig {
            engine,
            starfield,
            bubbles,
            skills,
        } = config;

        Ok(Self {
            engine,
            starfield: Starfield::new(starfield)?,
            bubbles: BubbleCloud::new(bubbles, skills)?,
            follower: CursorFollower::new(FOLLOWER_EASING),
        })
    }

    /// Host loop settings
    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine
    }

    /// Background controller
    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    /// Bubble controller
    pub fn bubble_cloud(&self) -> &BubbleCloud {
        &self.bubbles
    }

    /// Pointer glow
    pub fn follower(&self) -> &CursorFollower {
        &self.follower
    }

    /// Mount both effects into `viewport`
    pub fn mount(&mut self, viewport: Viewport, now_ms: f64) -> Result<(), EngineError> {
        self.starfield.mount(viewport, now_ms)?;
        self.bubbles.mount(viewport, now_ms)?;
        info!("skill scene mounted with {} skills", self.bubbles.bubbles().len());
        Ok(())
    }

    /// Advance and draw both effects
    pub fn frame<S>(&mut self, now_ms: f64, surface: &mut S) -> Result<SceneFrame, EngineError>
    where
        S: Surface + BubbleSurface,
    {
        let starfield = self.starfield.frame(now_ms, surface)?;
        let bubbles = self.bubbles.frame(now_ms, surface)?;
        let follower_moved = self.follower.step(now_ms);
        Ok(SceneFrame {
            starfield,
            bubbles,
            follower_moved,
        })
    }

    /// Forward a new viewport to both effects
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), EngineError> {
        self.starfield.resize(viewport)?;
        self.bubbles.resize(viewport)
    }

    /// Route one host input
    pub fn handle_event(&mut self, event: &InteractionEvent, now_ms: f64) -> Result<(), EngineError> {
        self.bubbles.state().ensure_live()?;
        match event {
            InteractionEvent::HoverEnter(id) => self.bubbles.hover(id, true),
            InteractionEvent::HoverLeave(id) => self.bubbles.hover(id, false),
            InteractionEvent::Click(id) => self.bubbles.pop(id, now_ms).map(|_| ()),
            InteractionEvent::PointerMoved(position) => {
                self.follower.pointer_moved(*position, now_ms);
                Ok(())
            }
            InteractionEvent::PointerLeft => {
                self.follower.pointer_left();
                Ok(())
            }
        }
    }

    /// Pull towards the pointer for a bubble, in pixels
    pub fn magnetic_offset(&self, id: &BubbleId, pointer: Vec2) -> Option<Vec2> {
        let viewport = self.bubbles.viewport()?;
        let bubble = self.bubbles.bubble(id)?;
        let center = Vec2::new(
            bubble.position.x * viewport.width / 100.0,
            bubble.position.y * viewport.height / 100.0,
        );
        Some(magnetic_offset(pointer, center))
    }

    /// Unmount both effects
    pub fn unmount(&mut self) -> Result<(), EngineError> {
        self.starfield.unmount()?;
        self.bubbles.unmount()?;
        self.follower.pointer_left();
        Ok(())
    }

    /// Notifications of both effects, starfield first
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        let mut events = self.starfield.drain_events();
        events.extend(self.bubbles.drain_events());
        events
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// The controller was unmounted
    #[error("Controller is disposed")]
    Disposed,

    /// No entity with this id
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    /// An entity set contained the same id twice
    #[error("Duplicate entity id: {0}")]
    DuplicateEntity(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Surface output failed
    #[error("Rendering error: {0}")]
    Render(String),
}
