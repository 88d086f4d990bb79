//! Skill bubble cloud controller
//!
//! Bubbles are placed once per mount and start scaled down; an entrance task
//! scales them up shortly after. Popping hides a bubble, freezes it in place
//! and schedules a respawn. Resizing only updates the container measurement,
//! since positions and radii are percentages.

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::config::{BubbleCloudConfig, SkillEntry};
use crate::core::viewport::Viewport;
use crate::engine::EngineError;
use crate::entities::bubble::{Bubble, BubbleFlags, BubbleId};
use crate::entities::store::EntityStore;
use crate::events::{EffectKind, EngineEvent};
use crate::foundation::math::Vec2;
use crate::foundation::time::FrameClock;
use crate::lifecycle::scheduler::{FrameRequest, TaskId, TaskQueue};
use crate::lifecycle::{FrameOutcome, LifecycleState};
use crate::physics::bubbles::{step_bubbles, CloudBounds};
use crate::placement::circles::{place_circles, PlacementParams};
use crate::render::bubbles::{layout_bubbles, BubbleSurface};

/// Deferred work of a bubble cloud
#[derive(Debug, Clone, PartialEq, Eq)]
enum CloudTask {
    /// Scale every bubble up after mount
    Entrance,
    /// Bring a popped bubble back
    Respawn(BubbleId),
}

/// Result of [`BubbleCloud::pop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// Popped; the respawn is scheduled under the returned ticket
    Popped {
        /// Pops including this one
        pop_count: u32,
        /// Ticket of the respawn task
        respawn: TaskId,
    },
    /// Already popped and waiting for its respawn; nothing changed
    AlreadyPopped,
}

/// A mounted skill bubble cloud
#[derive(Debug)]
pub struct BubbleCloud {
    config: BubbleCloudConfig,
    skills: Vec<SkillEntry>,
    bounds: CloudBounds,
    state: LifecycleState,
    viewport: Option<Viewport>,
    bubbles: EntityStore<Bubble>,
    tasks: TaskQueue<CloudTask>,
    frame: FrameRequest,
    rng: StdRng,
    clock: FrameClock,
    events: Vec<EngineEvent>,
}

impl BubbleCloud {
    /// Create an unmounted cloud for `skills`, validating `config`
    pub fn new(config: BubbleCloudConfig, skills: Vec<SkillEntry>) -> Result<Self, EngineError> {
        config.validate()?;
        let rng = config.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

        Ok(Self {
            bounds: CloudBounds::percent(config.wall_padding),
            config,
            skills,
            state: LifecycleState::Uninitialized,
            viewport: None,
            bubbles: EntityStore::new(),
            tasks: TaskQueue::new(),
            frame: FrameRequest::default(),
            rng,
            clock: FrameClock::new(),
            events: Vec::new(),
        })
    }

    /// Current state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Bubbles in skill list order
    pub fn bubbles(&self) -> &[Bubble] {
        self.bubbles.entities()
    }

    /// Look up a bubble
    pub fn bubble(&self, id: &BubbleId) -> Option<&Bubble> {
        self.bubbles.get(id)
    }

    /// Bubble of the first skill named `name`
    pub fn find_by_name(&self, name: &str) -> Option<&Bubble> {
        self.bubbles().iter().find(|b| b.skill.name == name)
    }

    /// Last measurement
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Deferred tasks still waiting
    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Whether a frame is requested
    pub fn is_frame_requested(&self) -> bool {
        self.frame.is_requested()
    }

    /// Frame timing
    pub fn frame_clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Measure, place every bubble and start ticking.
    ///
    /// Mounting again discards the previous cloud and its pending tasks.
    pub fn mount(&mut self, viewport: Viewport, now_ms: f64) -> Result<(), EngineError> {
        self.state.ensure_live()?;
        self.state = LifecycleState::Seeding;
        self.viewport = Some(viewport);
        self.tasks.cancel_all();

        let bubbles = self.seed(&viewport);
        let fallbacks = bubbles.iter().filter(|(_, fallback)| *fallback).count();
        self.bubbles.replace_all(bubbles.into_iter().map(|(b, _)| b).collect())?;
        self.tasks
            .schedule(now_ms, self.config.entrance_delay_ms, CloudTask::Entrance);

        self.state = LifecycleState::Running;
        self.frame.request();
        self.events.push(EngineEvent::Seeded {
            effect: EffectKind::BubbleCloud,
            count: self.bubbles.len(),
        });
        info!(
            "bubble cloud mounted: {} bubbles, {fallbacks} placed at the center",
            self.bubbles.len()
        );
        Ok(())
    }

    /// Run due tasks, advance and present one tick
    pub fn frame<S: BubbleSurface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> Result<FrameOutcome, EngineError> {
        self.state.ensure_live()?;
        if self.state != LifecycleState::Running || !self.frame.take() {
            return Ok(FrameOutcome::NotRunning);
        }

        self.run_due_tasks(now_ms);

        let viewport = match self.viewport {
            Some(v) if v.is_measurable() => v,
            _ => {
                trace!("bubble cloud frame skipped: no measurable viewport");
                self.frame.request();
                return Ok(FrameOutcome::Skipped);
            }
        };

        let bounds = self.bounds;
        let report = self.bubbles.with_all_mut(|bubbles| step_bubbles(bubbles, &bounds));
        let elements = layout_bubbles(self.bubbles.entities(), &viewport, self.config.min_diameter_px);
        surface.present(&elements);
        self.clock.tick(now_ms);
        trace!(
            "bubble cloud frame {}: {} wall hits, {} pair hits",
            self.clock.frame_count(),
            report.wall_hits,
            report.pair_hits
        );

        self.frame.request();
        Ok(FrameOutcome::Rendered)
    }

    /// New container measurement; bubbles keep their percent positions
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), EngineError> {
        self.state.ensure_live()?;
        if !viewport.is_measurable() {
            warn!("bubble cloud viewport has no area, rendering paused");
        }
        self.viewport = Some(viewport);
        debug!("bubble cloud resized to {}x{}", viewport.width, viewport.height);
        self.events.push(EngineEvent::Resized {
            effect: EffectKind::BubbleCloud,
            viewport,
        });
        Ok(())
    }

    /// Pop a bubble and schedule its respawn
    pub fn pop(&mut self, id: &BubbleId, now_ms: f64) -> Result<PopOutcome, EngineError> {
        self.state.ensure_live()?;
        let bubble = self
            .bubbles
            .get(id)
            .ok_or_else(|| EngineError::UnknownEntity(id.to_string()))?;
        if bubble.is_popping() {
            return Ok(PopOutcome::AlreadyPopped);
        }

        if let Some(stale) = bubble.respawn {
            self.tasks.cancel(stale);
        }
        let ticket = self.tasks.schedule(
            now_ms,
            self.config.respawn_delay_ms,
            CloudTask::Respawn(id.clone()),
        );

        let pop_count = self.bubbles.update(id, |b| {
            b.flags.insert(BubbleFlags::POPPING);
            b.flags.remove(BubbleFlags::HOVERED);
            b.target_scale = 0.0;
            b.velocity = Vec2::zeros();
            b.pop_count += 1;
            b.respawn = Some(ticket);
            b.pop_count
        })?;

        debug!("popped {id} ({pop_count} times), respawn at {:.1} ms", now_ms + self.config.respawn_delay_ms);
        self.events.push(EngineEvent::Popped {
            id: id.clone(),
            pop_count,
        });
        Ok(PopOutcome::Popped {
            pop_count,
            respawn: ticket,
        })
    }

    /// Pointer entered or left a bubble. Entering a popped bubble is ignored.
    pub fn hover(&mut self, id: &BubbleId, hovering: bool) -> Result<(), EngineError> {
        self.state.ensure_live()?;
        self.bubbles.update(id, |b| {
            if !hovering {
                b.flags.remove(BubbleFlags::HOVERED);
            } else if !b.is_popping() {
                b.flags.insert(BubbleFlags::HOVERED);
            }
        })
    }

    /// Stop ticking, cancel every task and drop the bubbles
    pub fn unmount(&mut self) -> Result<(), EngineError> {
        self.state.ensure_live()?;
        self.frame.cancel();
        let cancelled = self.tasks.cancel_all();
        self.bubbles.clear();
        self.state = LifecycleState::Disposed;
        self.events.push(EngineEvent::Disposed {
            effect: EffectKind::BubbleCloud,
        });
        info!("bubble cloud disposed, {cancelled} pending tasks cancelled");
        Ok(())
    }

    /// Take the queued notifications
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    fn seed(&mut self, viewport: &Viewport) -> Vec<(Bubble, bool)> {
        let count = self.skills.len();
        let params = PlacementParams::percent(
            self.config.wall_padding,
            self.config.separation_multiplier,
            self.config.attempts_per_entity,
            count,
        );
        let (base, variation) = (self.config.base_radius_vw, self.config.radius_variation_vw);
        let viewport = *viewport;
        let placements = place_circles(count, &params, &mut self.rng, |rng| {
            let radius_vw = base + rng.gen_range(-variation..=variation);
            viewport.vw_radius_to_percent(radius_vw)
        });

        let speed = self.config.base_speed;
        self.skills
            .iter()
            .zip(placements)
            .enumerate()
            .map(|(index, (skill, placement))| {
                let bubble = Bubble::new(
                    BubbleId::for_skill(index, skill),
                    skill.clone(),
                    placement.center,
                    placement.radius,
                )
                .with_velocity(random_velocity(&mut self.rng, speed))
                .hidden();
                (bubble, placement.fallback)
            })
            .collect()
    }

    fn run_due_tasks(&mut self, now_ms: f64) {
        for (ticket, task) in self.tasks.drain_due(now_ms) {
            match task {
                CloudTask::Entrance => {
                    let shown = self
                        .bubbles
                        .update_where(|b| !b.is_popping(), |b| b.target_scale = 1.0);
                    debug!("entrance animation started for {shown} bubbles");
                }
                CloudTask::Respawn(id) => self.respawn(&id, ticket),
            }
        }
    }

    fn respawn(&mut self, id: &BubbleId, ticket: TaskId) {
        let velocity = random_velocity(&mut self.rng, self.config.base_speed);
        let respawned = self.bubbles.update(id, |b| {
            if b.respawn != Some(ticket) {
                return false;
            }
            b.flags.remove(BubbleFlags::POPPING);
            b.target_scale = 1.0;
            b.velocity = velocity;
            b.respawn = None;
            true
        });

        match respawned {
            Ok(true) => {
                debug!("respawned {id}");
                self.events.push(EngineEvent::Respawned { id: id.clone() });
            }
            Ok(false) => trace!("stale respawn ticket for {id} ignored"),
            Err(e) => warn!("respawn skipped: {e}"),
        }
    }
}

/// Random velocity with each axis in `[-speed, speed]`, never the zero vector
fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    let mut sample = || Vec2::new(rng.gen_range(-speed..=speed), rng.gen_range(-speed..=speed));
    std::iter::repeat_with(&mut sample)
        .take(8)
        .find(|v| v.norm_squared() > 0.0)
        .unwrap_or_else(|| Vec2::new(speed, speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::bubbles::ElementLog;
    use approx::assert_relative_eq;

    fn skills() -> Vec<SkillEntry> {
        ["React", "TypeScript", "Node.js", "Figma"]
            .iter()
            .map(|name| SkillEntry::new(*name, 80, "test"))
            .collect()
    }

    fn mounted() -> BubbleCloud {
        let mut cloud = BubbleCloud::new(BubbleCloudConfig::new().with_seed(42), skills()).unwrap();
        cloud.mount(Viewport::new(1200.0, 800.0), 0.0).unwrap();
        cloud
    }

    #[test]
    fn test_mount_places_hidden_bubbles() {
        let cloud = mounted();
        assert_eq!(cloud.state(), LifecycleState::Running);
        assert_eq!(cloud.bubbles().len(), 4);
        assert_eq!(cloud.pending_tasks(), 1);

        let ids: Vec<&str> = cloud.bubbles().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["skill-0-React", "skill-1-TypeScript", "skill-2-Node.js", "skill-3-Figma"]);
        for bubble in cloud.bubbles() {
            assert_relative_eq!(bubble.target_scale, 0.0);
            assert!(bubble.velocity.norm() > 0.0);
            assert!(bubble.velocity.x.abs() <= 0.03 && bubble.velocity.y.abs() <= 0.03);
            // 5 ± 2 vw over a full-width container
            assert!((1.5..=3.5).contains(&bubble.radius));
        }
    }

    #[test]
    fn test_entrance_after_delay() {
        let mut cloud = mounted();
        let mut log = ElementLog::new();

        cloud.frame(50.0, &mut log).unwrap();
        assert!(cloud.bubbles().iter().all(|b| b.target_scale == 0.0));

        cloud.frame(100.0, &mut log).unwrap();
        assert!(cloud.bubbles().iter().all(|b| b.target_scale == 1.0));
        assert_eq!(cloud.pending_tasks(), 0);
        assert_eq!(log.frame_count(), 2);
    }

    #[test]
    fn test_pop_twice_is_a_no_op() {
        let mut cloud = mounted();
        let id = cloud.bubbles()[0].id.clone();

        let first = cloud.pop(&id, 10.0).unwrap();
        assert!(matches!(first, PopOutcome::Popped { pop_count: 1, .. }));
        assert_eq!(cloud.pop(&id, 20.0).unwrap(), PopOutcome::AlreadyPopped);
        assert_eq!(cloud.bubble(&id).unwrap().pop_count, 1);
        assert_eq!(cloud.pending_tasks(), 2);
    }

    #[test]
    fn test_hover_rules() {
        let mut cloud = mounted();
        let id = cloud.bubbles()[1].id.clone();

        cloud.hover(&id, true).unwrap();
        assert!(cloud.bubble(&id).unwrap().is_hovered());

        cloud.pop(&id, 0.0).unwrap();
        assert!(!cloud.bubble(&id).unwrap().is_hovered());
        cloud.hover(&id, true).unwrap();
        assert!(!cloud.bubble(&id).unwrap().is_hovered());

        let unknown = BubbleId::for_skill(99, &SkillEntry::new("Cobol", 1, "legacy"));
        assert!(matches!(cloud.hover(&unknown, true), Err(EngineError::UnknownEntity(_))));
        assert!(matches!(cloud.pop(&unknown, 0.0), Err(EngineError::UnknownEntity(_))));
    }

    #[test]
    fn test_resize_keeps_positions() {
        let mut cloud = mounted();
        let before: Vec<Vec2> = cloud.bubbles().iter().map(|b| b.position).collect();

        cloud.resize(Viewport::new(600.0, 400.0)).unwrap();
        let after: Vec<Vec2> = cloud.bubbles().iter().map(|b| b.position).collect();
        assert_eq!(before, after);
        assert_eq!(cloud.state(), LifecycleState::Running);
    }

    #[test]
    fn test_zero_viewport_skips_but_runs_tasks() {
        let mut cloud = BubbleCloud::new(BubbleCloudConfig::new().with_seed(1), skills()).unwrap();
        cloud.mount(Viewport::new(0.0, 0.0), 0.0).unwrap();
        let mut log = ElementLog::new();

        assert_eq!(cloud.frame(200.0, &mut log).unwrap(), FrameOutcome::Skipped);
        assert_eq!(log.frame_count(), 0);
        assert!(cloud.is_frame_requested());
        assert!(cloud.bubbles().iter().all(|b| b.target_scale == 1.0));
    }

    #[test]
    fn test_random_velocity_is_bounded_and_nonzero() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..500 {
            let v = random_velocity(&mut rng, 0.03);
            assert!(v.norm_squared() > 0.0);
            assert!(v.x.abs() <= 0.03 && v.y.abs() <= 0.03);
        }
    }
}
