//! Skill cloud headless renderer
//!
//! Renders the skills section (a starfield behind a bubble cloud) without a
//! window: the frame loop runs on a simulated clock, a scripted visitor pops
//! bubbles, and snapshots are written as PNG files.
//!
//! ```text
//! skill_cloud [config.toml | config.ron]
//! ```

mod config;
mod session;

use motion_engine::core::{Config, ConfigError};
use motion_engine::foundation::logging;
use motion_engine::EngineError;
use thiserror::Error;

use crate::config::HostConfig;
use crate::session::Session;

/// Host errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine failure
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Output directory could not be prepared
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn run() -> Result<(), AppError> {
    let config = match std::env::args().nth(1) {
        Some(path) => HostConfig::load_from_file(path)?,
        None => HostConfig::default(),
    }
    .with_default_skills();

    logging::init_with_level(&config.scene.engine.log_level);
    log::info!("Starting skill cloud with {} skills", config.scene.skills.len());

    std::fs::create_dir_all(&config.output.directory)?;
    let summary = Session::new(config)?.run()?;

    if let Some(last) = summary.snapshots.last() {
        log::info!("Last snapshot: {}", last.display());
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        // Logging may not be up yet when the config fails to load
        eprintln!("skill_cloud: {e}");
        log::error!("{e}");
        std::process::exit(1);
    }
}
