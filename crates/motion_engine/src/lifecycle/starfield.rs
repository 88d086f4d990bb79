//! Starfield controller

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::config::StarfieldConfig;
use crate::core::viewport::Viewport;
use crate::engine::EngineError;
use crate::entities::star::Star;
use crate::entities::store::EntityStore;
use crate::events::{EffectKind, EngineEvent};
use crate::foundation::math::Rgba;
use crate::foundation::time::FrameClock;
use crate::lifecycle::scheduler::FrameRequest;
use crate::lifecycle::{FrameOutcome, LifecycleState};
use crate::physics::starfield::{step_starfield, StarMotion};
use crate::placement::stars::seed_stars;
use crate::render::{render_starfield, Surface};

/// A mounted depth-parallax starfield
///
/// Every resize reseeds the whole field, because the far plane follows the
/// larger side of the viewport. Seeding restarts the generator from the
/// configured seed, so the same viewport always yields the same field.
#[derive(Debug)]
pub struct Starfield {
    config: StarfieldConfig,
    motion: StarMotion,
    palette: Vec<Rgba>,
    background: Rgba,
    state: LifecycleState,
    viewport: Option<Viewport>,
    stars: EntityStore<Star>,
    rng: StdRng,
    frame: FrameRequest,
    clock: FrameClock,
    events: Vec<EngineEvent>,
}

impl Starfield {
    /// Create an unmounted starfield, validating `config`
    pub fn new(config: StarfieldConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let palette = config.palette_colors()?;
        let background = config.background_color()?;
        let motion = StarMotion {
            base_speed: config.base_speed,
            fov: config.fov,
            twinkle_intensity: config.twinkle_intensity,
        };
        let rng = StdRng::seed_from_u64(config.seed);

        Ok(Self {
            config,
            motion,
            palette,
            background,
            state: LifecycleState::Uninitialized,
            viewport: None,
            stars: EntityStore::new(),
            rng,
            frame: FrameRequest::default(),
            clock: FrameClock::new(),
            events: Vec::new(),
        })
    }

    /// Current state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Stars in depth order of the last seeding
    pub fn stars(&self) -> &[Star] {
        self.stars.entities()
    }

    /// Reseed counter
    pub fn generation(&self) -> u64 {
        self.stars.generation()
    }

    /// Last measurement
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Far plane of the current viewport
    pub fn max_depth(&self) -> f32 {
        self.viewport.map_or(0.0, |v| v.max_depth())
    }

    /// Whether a frame is requested
    pub fn is_frame_requested(&self) -> bool {
        self.frame.is_requested()
    }

    /// Frame timing
    pub fn frame_clock(&self) -> &FrameClock {
        &self.clock
    }

    /// Measure, seed and start ticking
    pub fn mount(&mut self, viewport: Viewport, now_ms: f64) -> Result<(), EngineError> {
        self.state.ensure_live()?;
        self.viewport = Some(viewport);
        self.reseed()?;
        self.state = LifecycleState::Running;
        self.frame.request();
        info!(
            "starfield mounted at {now_ms:.1} ms: {} stars in {}x{}",
            self.stars.len(),
            viewport.width,
            viewport.height
        );
        Ok(())
    }

    /// Advance and draw one tick
    pub fn frame<S: Surface + ?Sized>(&mut self, now_ms: f64, surface: &mut S) -> Result<FrameOutcome, EngineError> {
        self.state.ensure_live()?;
        if self.state != LifecycleState::Running || !self.frame.take() {
            return Ok(FrameOutcome::NotRunning);
        }

        let viewport = match self.viewport {
            Some(v) if v.is_measurable() => v,
            _ => {
                trace!("starfield frame skipped: no measurable viewport");
                self.frame.request();
                return Ok(FrameOutcome::Skipped);
            }
        };

        let max_depth = viewport.max_depth();
        let speed = self.motion.base_speed;
        let rng = &mut self.rng;
        let recycled = self
            .stars
            .with_all_mut(|stars| step_starfield(stars, speed, max_depth, rng));

        let drawn = render_starfield(
            surface,
            self.stars.entities(),
            &self.motion,
            self.background,
            (viewport.width, viewport.height),
            now_ms,
        );
        self.clock.tick(now_ms);
        trace!(
            "starfield frame {}: {drawn} drawn, {recycled} recycled",
            self.clock.frame_count()
        );

        self.frame.request();
        Ok(FrameOutcome::Rendered)
    }

    /// New viewport: full reseed
    pub fn resize(&mut self, viewport: Viewport) -> Result<(), EngineError> {
        self.state.ensure_live()?;
        let was_running = self.state == LifecycleState::Running;
        self.state = LifecycleState::Resizing;
        self.viewport = Some(viewport);
        debug!("starfield resized to {}x{}", viewport.width, viewport.height);
        self.events.push(EngineEvent::Resized {
            effect: EffectKind::Starfield,
            viewport,
        });

        self.reseed()?;
        self.state = if was_running {
            LifecycleState::Running
        } else {
            LifecycleState::Uninitialized
        };
        Ok(())
    }

    /// Stop ticking and drop every star
    pub fn unmount(&mut self) -> Result<(), EngineError> {
        self.state.ensure_live()?;
        self.frame.cancel();
        self.stars.clear();
        self.state = LifecycleState::Disposed;
        self.events.push(EngineEvent::Disposed {
            effect: EffectKind::Starfield,
        });
        info!("starfield disposed after {} frames", self.clock.frame_count());
        Ok(())
    }

    /// Take the queued notifications
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    fn reseed(&mut self) -> Result<(), EngineError> {
        self.state = LifecycleState::Seeding;
        let viewport = self.viewport.filter(Viewport::is_measurable);
        let stars = match viewport {
            Some(v) => {
                self.rng = StdRng::seed_from_u64(self.config.seed);
                seed_stars(self.config.star_count, v.max_depth(), &self.palette, &mut self.rng)
            }
            None => {
                warn!("starfield viewport has no area, waiting for a measurement");
                Vec::new()
            }
        };

        self.stars.replace_all(stars)?;
        self.events.push(EngineEvent::Seeded {
            effect: EffectKind::Starfield,
            count: self.stars.len(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CommandRecorder;

    fn field(count: usize) -> Starfield {
        Starfield::new(StarfieldConfig::new().with_star_count(count)).unwrap()
    }

    #[test]
    fn test_mount_seeds_and_requests_a_frame() {
        let mut starfield = field(50);
        assert_eq!(starfield.state(), LifecycleState::Uninitialized);

        starfield.mount(Viewport::new(640.0, 480.0), 0.0).unwrap();
        assert_eq!(starfield.state(), LifecycleState::Running);
        assert_eq!(starfield.stars().len(), 50);
        assert!(starfield.is_frame_requested());
        assert!(starfield.stars().iter().all(|s| s.depth > 0.0 && s.depth <= 640.0));
        assert_eq!(
            starfield.drain_events(),
            vec![EngineEvent::Seeded {
                effect: EffectKind::Starfield,
                count: 50
            }]
        );
    }

    #[test]
    fn test_frame_needs_mount_and_request() {
        let mut starfield = field(10);
        let mut surface = CommandRecorder::new(100, 100);
        assert_eq!(starfield.frame(0.0, &mut surface).unwrap(), FrameOutcome::NotRunning);

        starfield.mount(Viewport::new(100.0, 100.0), 0.0).unwrap();
        assert_eq!(starfield.frame(16.0, &mut surface).unwrap(), FrameOutcome::Rendered);
        assert!(starfield.is_frame_requested());
        assert_eq!(starfield.frame_clock().frame_count(), 1);
    }

    #[test]
    fn test_zero_viewport_skips_until_measured() {
        let mut starfield = field(10);
        let mut surface = CommandRecorder::new(0, 0);
        starfield.mount(Viewport::new(0.0, 0.0), 0.0).unwrap();
        assert!(starfield.stars().is_empty());

        assert_eq!(starfield.frame(16.0, &mut surface).unwrap(), FrameOutcome::Skipped);
        assert!(surface.commands().is_empty());
        assert!(starfield.is_frame_requested());

        starfield.resize(Viewport::new(300.0, 200.0)).unwrap();
        assert_eq!(starfield.stars().len(), 10);
        assert_eq!(starfield.frame(32.0, &mut surface).unwrap(), FrameOutcome::Rendered);
    }

    #[test]
    fn test_resize_reseeds_deterministically() {
        let mut starfield = field(30);
        starfield.mount(Viewport::new(400.0, 300.0), 0.0).unwrap();
        let first = starfield.stars().to_vec();
        let generation = starfield.generation();

        starfield.resize(Viewport::new(1000.0, 300.0)).unwrap();
        assert_eq!(starfield.state(), LifecycleState::Running);
        assert!(starfield.generation() > generation);
        assert!(starfield.stars().iter().any(|s| s.depth > 400.0));

        starfield.resize(Viewport::new(400.0, 300.0)).unwrap();
        assert_eq!(starfield.stars(), first.as_slice());
    }

    #[test]
    fn test_unmount_disposes() {
        let mut starfield = field(5);
        starfield.mount(Viewport::new(100.0, 100.0), 0.0).unwrap();
        starfield.unmount().unwrap();

        assert_eq!(starfield.state(), LifecycleState::Disposed);
        assert!(!starfield.is_frame_requested());
        assert!(starfield.stars().is_empty());
        let mut surface = CommandRecorder::new(100, 100);
        assert!(matches!(starfield.frame(16.0, &mut surface), Err(EngineError::Disposed)));
        assert!(matches!(starfield.resize(Viewport::new(10.0, 10.0)), Err(EngineError::Disposed)));
        assert!(matches!(starfield.unmount(), Err(EngineError::Disposed)));
    }

    #[test]
    fn test_invalid_palette_is_a_config_error() {
        let config = StarfieldConfig::new().with_palette(["#GGGGGG"]);
        assert!(matches!(Starfield::new(config), Err(EngineError::Config(_))));
    }
}
