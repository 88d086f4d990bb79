//! # Unified Configuration System
//!
//! Every tunable of the engine lives here as an explicit constructor input:
//! the starfield look, bubble cloud physics, the skill list and the host
//! loop settings.
//!
//! ## Configuration Categories
//!
//! - **Engine Config**: log level and frame cadence of the host loop
//! - **Starfield Config**: star count, palette, depth speed, projection, twinkle
//! - **Bubble Cloud Config**: radii, spacing, padding, speed and timer delays
//! - **Skills**: the labelled entries that become bubbles

use serde::{Serialize, Deserialize};

use crate::foundation::math::Rgba;

// Re-export the file format layer for convenience
pub use crate::config::{Config, ConfigError};

fn validation(message: impl Into<String>) -> ConfigError {
    ConfigError::Validation(message.into())
}

/// # Engine Configuration
///
/// Host loop behavior shared by every effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine
    pub log_level: String,
    /// Frame rate the host loop simulates
    pub target_fps: u32,
    /// Whether to enable debug features
    pub debug_mode: bool,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            target_fps: 60,
            debug_mode: cfg!(debug_assertions),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set target FPS
    pub fn with_target_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps;
        self
    }

    /// Milliseconds between two frames at the target rate
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.target_fps.max(1))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_fps == 0 || self.target_fps > 240 {
            return Err(validation(format!(
                "target_fps must be in 1..=240, got {}",
                self.target_fps
            )));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Starfield Configuration
///
/// Depth-parallax star field. Depth is measured in pixels, so the far plane
/// is always `max(width, height)` of the current viewport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of stars
    pub star_count: usize,
    /// Hex colors stars are drawn in
    pub palette: Vec<String>,
    /// Depth lost per tick
    pub base_speed: f32,
    /// Projection field-of-view distance
    pub fov: f32,
    /// Share of the base opacity that oscillates, in `[0, 1]`
    pub twinkle_intensity: f32,
    /// Hex color the surface is cleared to every frame
    pub background: String,
    /// Seed of the star generator
    pub seed: u64,
}

impl StarfieldConfig {
    /// Create the default starfield
    pub fn new() -> Self {
        Self {
            star_count: 800,
            palette: ["#FFFFFF", "#FFFFE0", "#D4F1F9", "#FFE4C4"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            base_speed: 0.02,
            fov: 300.0,
            twinkle_intensity: 0.5,
            background: "#000000".to_string(),
            seed: 12345,
        }
    }

    /// Set star count
    pub fn with_star_count(mut self, count: usize) -> Self {
        self.star_count = count;
        self
    }

    /// Replace the palette
    pub fn with_palette<I, S>(mut self, palette: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = palette.into_iter().map(Into::into).collect();
        self
    }

    /// Set depth speed
    pub fn with_base_speed(mut self, speed: f32) -> Self {
        self.base_speed = speed;
        self
    }

    /// Set projection distance
    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    /// Set twinkle intensity
    pub fn with_twinkle_intensity(mut self, intensity: f32) -> Self {
        self.twinkle_intensity = intensity;
        self
    }

    /// Set generator seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Parsed palette
    pub fn palette_colors(&self) -> Result<Vec<Rgba>, ConfigError> {
        self.palette
            .iter()
            .map(|hex| Rgba::from_hex(hex).map_err(|e| validation(format!("palette: {e}"))))
            .collect()
    }

    /// Parsed background color
    pub fn background_color(&self) -> Result<Rgba, ConfigError> {
        Rgba::from_hex(&self.background).map_err(|e| validation(format!("background: {e}")))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(validation("palette must contain at least one color"));
        }
        self.palette_colors()?;
        self.background_color()?;

        if !(self.fov.is_finite() && self.fov > 0.0) {
            return Err(validation(format!("fov must be positive, got {}", self.fov)));
        }
        if !(self.base_speed.is_finite() && self.base_speed >= 0.0) {
            return Err(validation(format!(
                "base_speed must be non-negative, got {}",
                self.base_speed
            )));
        }
        if !(0.0..=1.0).contains(&self.twinkle_intensity) {
            return Err(validation(format!(
                "twinkle_intensity must be in [0, 1], got {}",
                self.twinkle_intensity
            )));
        }
        Ok(())
    }
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Bubble Cloud Configuration
///
/// Positions and radii are percentages of the container. Radii are specified
/// in viewport-width units and converted per container on mount.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BubbleCloudConfig {
    /// Mean bubble radius in viewport-width units
    pub base_radius_vw: f32,
    /// Maximum deviation from the mean radius
    pub radius_variation_vw: f32,
    /// Minimum center distance as a multiple of the summed radii at placement
    pub separation_multiplier: f32,
    /// Distance kept from every wall, in percent
    pub wall_padding: f32,
    /// Largest per-axis velocity component, in percent per tick
    pub base_speed: f32,
    /// Delay between a pop and the respawn
    pub respawn_delay_ms: f64,
    /// Delay between mount and the entrance scale-up
    pub entrance_delay_ms: f64,
    /// Smallest rendered diameter in pixels
    pub min_diameter_px: f32,
    /// Placement attempts per bubble, multiplied by the bubble count
    pub attempts_per_entity: usize,
    /// Seed of the bubble generator; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl BubbleCloudConfig {
    /// Create the default bubble cloud
    pub fn new() -> Self {
        Self {
            base_radius_vw: 5.0,
            radius_variation_vw: 2.0,
            separation_multiplier: 1.1,
            wall_padding: 1.0,
            base_speed: 0.03,
            respawn_delay_ms: 1500.0,
            entrance_delay_ms: 100.0,
            min_diameter_px: 30.0,
            attempts_per_entity: 20,
            seed: None,
        }
    }

    /// Use a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set respawn delay
    pub fn with_respawn_delay_ms(mut self, delay: f64) -> Self {
        self.respawn_delay_ms = delay;
        self
    }

    /// Set wall padding
    pub fn with_wall_padding(mut self, padding: f32) -> Self {
        self.wall_padding = padding;
        self
    }

    /// Set radius mean and variation
    pub fn with_radius(mut self, base_vw: f32, variation_vw: f32) -> Self {
        self.base_radius_vw = base_vw;
        self.radius_variation_vw = variation_vw;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_radius_vw > 0.0 && self.radius_variation_vw >= 0.0) {
            return Err(validation("bubble radius must be positive"));
        }
        if self.radius_variation_vw >= self.base_radius_vw {
            return Err(validation(format!(
                "radius_variation_vw ({}) must be smaller than base_radius_vw ({})",
                self.radius_variation_vw, self.base_radius_vw
            )));
        }
        if !(self.separation_multiplier.is_finite() && self.separation_multiplier > 0.0) {
            return Err(validation("separation_multiplier must be positive"));
        }
        if !(0.0..50.0).contains(&self.wall_padding) {
            return Err(validation(format!(
                "wall_padding must be in [0, 50), got {}",
                self.wall_padding
            )));
        }
        if !(self.base_speed.is_finite() && self.base_speed > 0.0) {
            return Err(validation("base_speed must be positive"));
        }
        if self.respawn_delay_ms < 0.0 || self.entrance_delay_ms < 0.0 {
            return Err(validation("timer delays must be non-negative"));
        }
        if self.attempts_per_entity == 0 {
            return Err(validation("attempts_per_entity must be at least 1"));
        }
        Ok(())
    }
}

impl Default for BubbleCloudConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// A labelled entry rendered as one bubble
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Display name
    pub name: String,
    /// Proficiency, kept for hover details
    #[serde(default)]
    pub level: u8,
    /// Grouping such as `frontend` or `tools`
    #[serde(default)]
    pub category: String,
    /// Shown in the hover tooltip
    #[serde(default)]
    pub description: Option<String>,
}

impl SkillEntry {
    /// Create a skill entry
    pub fn new(name: impl Into<String>, level: u8, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            category: category.into(),
            description: None,
        }
    }

    /// Attach a tooltip description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// # Complete Scene Configuration
///
/// Top-level configuration for a skills section: a starfield behind a
/// bubble cloud.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Host loop configuration
    pub engine: EngineConfig,
    /// Background starfield
    pub starfield: StarfieldConfig,
    /// Bubble physics and timers
    pub bubbles: BubbleCloudConfig,
    /// Entries rendered as bubbles, in display order
    pub skills: Vec<SkillEntry>,
}

impl SceneConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.starfield.validate()?;
        self.bubbles.validate()?;
        if let Some(blank) = self.skills.iter().position(|s| s.name.trim().is_empty()) {
            return Err(validation(format!("skill #{blank} has an empty name")));
        }
        Ok(())
    }
}

impl Config for SceneConfig {}
