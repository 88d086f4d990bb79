//! Host configuration
//!
//! The scene itself is configured through [`SceneConfig`]; the host adds the
//! output canvas, the simulated session length and the interaction script.

use std::path::PathBuf;

use motion_engine::core::{Config, ConfigError, SceneConfig, SkillEntry};
use serde::{Deserialize, Serialize};

/// Complete host configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Starfield, bubble cloud and loop settings
    pub scene: SceneConfig,
    /// Canvas and snapshots
    pub output: OutputConfig,
    /// Simulated visitor
    pub script: ScriptConfig,
}

impl Config for HostConfig {}

impl HostConfig {
    /// Use the portfolio skills when the file lists none
    pub fn with_default_skills(mut self) -> Self {
        if self.scene.skills.is_empty() {
            self.scene.skills = portfolio_skills();
        }
        self
    }

    /// Validate the whole configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scene.validate()?;
        self.output.validate()?;
        self.script.validate()
    }
}

/// Canvas and snapshot settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Window width used for bubble sizes; the canvas width when unset
    pub window_width: Option<u32>,
    /// Simulated session length
    pub duration_ms: f64,
    /// Write a PNG every this many frames; 0 writes only the last frame
    pub snapshot_every: u64,
    /// Where snapshots go
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            window_width: None,
            duration_ms: 5000.0,
            snapshot_every: 60,
            directory: PathBuf::from("frames"),
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(format!(
                "canvas must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.duration_ms.is_finite() && self.duration_ms >= 0.0) {
            return Err(ConfigError::Validation("duration_ms must be non-negative".to_string()));
        }
        Ok(())
    }
}

/// Scripted pointer activity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Pop a random bubble this often; 0 disables popping
    pub pop_interval_ms: f64,
    /// Sweep the pointer around the canvas
    pub move_pointer: bool,
    /// Seed of the visitor's choices
    pub seed: u64,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            pop_interval_ms: 700.0,
            move_pointer: true,
            seed: 7,
        }
    }
}

impl ScriptConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.pop_interval_ms.is_finite() && self.pop_interval_ms >= 0.0) {
            return Err(ConfigError::Validation("pop_interval_ms must be non-negative".to_string()));
        }
        Ok(())
    }
}

/// The portfolio skill list
pub fn portfolio_skills() -> Vec<SkillEntry> {
    [
        ("React", 90, "frontend", "Building dynamic UIs"),
        ("Next.js", 85, "frontend", "SSR & SSG with React"),
        ("TypeScript", 85, "frontend", "Strongly-typed JavaScript"),
        ("JavaScript", 95, "frontend", "Core web language"),
        ("HTML/CSS", 95, "frontend", "Web structure & styling"),
        ("Tailwind CSS", 90, "frontend", "Utility-first CSS"),
        ("Node.js", 85, "backend", "Server-side JavaScript"),
        ("Python", 70, "backend", "Versatile backend language"),
        ("Figma", 85, "design", "Collaborative interface design"),
        ("Git", 85, "tools", "Version control system"),
        ("Docker", 70, "tools", "Containerization platform"),
        ("UI/UX", 85, "other", "User Interface & Experience"),
        ("Three.js", 75, "other", "3D graphics library"),
    ]
    .into_iter()
    .map(|(name, level, category, description)| {
        SkillEntry::new(name, level, category).with_description(description)
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_in_portfolio() {
        let config = HostConfig::default().with_default_skills();
        assert_eq!(config.scene.skills.len(), 13);
        assert_eq!(config.scene.skills[0].name, "React");
        assert!(config.scene.skills.iter().all(|s| s.description.is_some()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_skills_are_kept() {
        let mut config = HostConfig::default();
        config.scene.skills.push(SkillEntry::new("Rust", 80, "backend"));
        let config = config.with_default_skills();
        assert_eq!(config.scene.skills.len(), 1);
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = std::env::temp_dir().join(format!("skill_cloud_config_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("host.toml");

        let mut config = HostConfig::default().with_default_skills();
        config.output.width = 640;
        config.script.pop_interval_ms = 250.0;
        config.save_to_file(&path).unwrap();

        let loaded = HostConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.output.width, 640);
        assert_eq!(loaded.scene.skills.len(), 13);
        approx::assert_relative_eq!(loaded.script.pop_interval_ms, 250.0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_canvas_is_rejected() {
        let mut config = HostConfig::default();
        config.output.height = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
