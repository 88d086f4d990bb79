//! Headless session
//!
//! Drives a [`SkillScene`] on a manual clock at the configured frame rate,
//! plays a scripted visitor against it and writes PNG snapshots.

use std::path::PathBuf;

use log::{debug, info};
use motion_engine::foundation::math::constants::TAU;
use motion_engine::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::{HostConfig, OutputConfig, ScriptConfig};
use crate::AppError;

const GLOW: Rgba = Rgba { r: 0x3B, g: 0x82, b: 0xF6, a: 0.25 };
const GLOW_RADIUS: f32 = 16.0;

/// Totals of a finished session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Frames that simulated and drew
    pub rendered: u64,
    /// Frames skipped for lack of a measurable viewport
    pub skipped: u64,
    /// Bubbles popped
    pub pops: u64,
    /// Bubbles that came back
    pub respawns: u64,
    /// Snapshot files written
    pub snapshots: Vec<PathBuf>,
}

/// One simulated visit
pub struct Session {
    scene: SkillScene,
    surface: RasterSurface,
    clock: ManualClock,
    frame_ms: f64,
    output: OutputConfig,
    script: ScriptConfig,
    rng: StdRng,
    next_pop_ms: f64,
    hovered: Option<BubbleId>,
}

impl Session {
    /// Build the scene and canvas
    pub fn new(config: HostConfig) -> Result<Self, AppError> {
        config.validate()?;
        let HostConfig { scene, output, script } = config;
        let frame_ms = scene.engine.frame_interval_ms();

        Ok(Self {
            scene: SkillScene::new(scene)?,
            surface: RasterSurface::new(output.width, output.height),
            clock: ManualClock::starting_at(0.0),
            frame_ms,
            rng: StdRng::seed_from_u64(script.seed),
            next_pop_ms: script.pop_interval_ms,
            output,
            script,
            hovered: None,
        })
    }

    fn viewport(&self) -> Viewport {
        let (width, height) = (self.output.width as f32, self.output.height as f32);
        let window = self.output.window_width.map_or(width, |w| w as f32);
        Viewport::new(width, height).with_window_width(window)
    }

    /// Run until the configured duration has elapsed
    pub fn run(mut self) -> Result<SessionSummary, AppError> {
        let mut summary = SessionSummary::default();
        let viewport = self.viewport();
        self.scene.mount(viewport, self.clock.now_ms())?;
        info!(
            "session started: {}x{} for {:.0} ms at {:.2} ms per frame",
            self.output.width, self.output.height, self.output.duration_ms, self.frame_ms
        );

        while self.clock.now_ms() < self.output.duration_ms {
            self.clock.advance(self.frame_ms);
            let now = self.clock.now_ms();
            self.play_script(now, viewport)?;

            let frame = self.scene.frame(now, &mut self.surface)?;
            match frame.bubbles {
                FrameOutcome::Rendered => summary.rendered += 1,
                FrameOutcome::Skipped => summary.skipped += 1,
                FrameOutcome::NotRunning => {}
            }
            if self.scene.follower().is_visible() {
                self.surface.fill_circle(self.scene.follower().position(), GLOW_RADIUS, GLOW);
            }

            for event in self.scene.drain_events() {
                match event {
                    EngineEvent::Popped { .. } => summary.pops += 1,
                    EngineEvent::Respawned { .. } => summary.respawns += 1,
                    _ => {}
                }
            }

            let frame_index = self.scene.bubble_cloud().frame_clock().frame_count();
            if self.output.snapshot_every > 0 && frame_index % self.output.snapshot_every == 0 {
                summary.snapshots.push(self.snapshot(frame_index)?);
            }
        }

        let clock = self.scene.bubble_cloud().frame_clock();
        let (last, fps) = (clock.frame_count(), clock.average_fps());
        if summary.snapshots.is_empty() {
            summary.snapshots.push(self.snapshot(last)?);
        }
        self.scene.unmount()?;
        info!(
            "session finished: {} frames at {fps:.1} fps ({} skipped), {} pops, {} respawns, {} snapshots",
            summary.rendered,
            summary.skipped,
            summary.pops,
            summary.respawns,
            summary.snapshots.len()
        );
        Ok(summary)
    }

    fn play_script(&mut self, now: f64, viewport: Viewport) -> Result<(), AppError> {
        if self.script.move_pointer {
            // One lap around an ellipse every four seconds
            let angle = (now / 4000.0) as f32 * TAU;
            let pointer = Vec2::new(
                viewport.width * (0.5 + 0.35 * angle.cos()),
                viewport.height * (0.5 + 0.35 * angle.sin()),
            );
            self.scene.handle_event(&InteractionEvent::PointerMoved(pointer), now)?;
        }

        if self.script.pop_interval_ms <= 0.0 || now < self.next_pop_ms {
            return Ok(());
        }
        self.next_pop_ms += self.script.pop_interval_ms;

        if let Some(previous) = self.hovered.take() {
            self.scene.handle_event(&InteractionEvent::HoverLeave(previous), now)?;
        }
        let candidates: Vec<BubbleId> = self
            .scene
            .bubble_cloud()
            .bubbles()
            .iter()
            .filter(|b| !b.is_popping())
            .map(|b| b.id.clone())
            .collect();
        let Some(target) = candidates.choose(&mut self.rng).cloned() else {
            debug!("every bubble is popped, skipping this pop");
            return Ok(());
        };

        self.scene.handle_event(&InteractionEvent::HoverEnter(target.clone()), now)?;
        self.scene.handle_event(&InteractionEvent::Click(target.clone()), now)?;
        self.hovered = Some(target);
        Ok(())
    }

    fn snapshot(&self, frame_index: u64) -> Result<PathBuf, AppError> {
        let path = self.output.directory.join(format!("frame_{frame_index:05}.png"));
        self.surface.save_png(&path)?;
        debug!("wrote {}", path.display());
        Ok(path)
    }
}
