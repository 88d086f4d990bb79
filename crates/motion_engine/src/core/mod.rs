//! # Core Engine Module
//!
//! Shared abstractions every controller depends on.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for the starfield, the bubble cloud and the host loop
//! - **Viewport**: Container measurements supplied by the host

pub mod config;
pub mod viewport;

// Re-export foundation modules for convenience
pub use crate::foundation;

// Re-export commonly used config types
pub use config::{
    BubbleCloudConfig,
    Config,
    ConfigError,
    EngineConfig,
    SceneConfig,
    SkillEntry,
    StarfieldConfig,
};
pub use viewport::Viewport;
