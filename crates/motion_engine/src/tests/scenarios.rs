//! End-to-end scenarios
//!
//! Each test mounts a controller, drives it with explicit timestamps and
//! checks the observable state between frames.

use crate::core::config::{BubbleCloudConfig, SkillEntry, StarfieldConfig};
use crate::core::viewport::Viewport;
use crate::engine::EngineError;
use crate::entities::bubble::{Bubble, BubbleId};
use crate::events::EngineEvent;
use crate::foundation::math::Vec2;
use crate::foundation::time::{Clock, ManualClock};
use crate::lifecycle::{BubbleCloud, FrameOutcome, LifecycleState, PopOutcome, Starfield};
use crate::physics::bubbles::{step_bubbles, CloudBounds};
use crate::placement::circles::{place_circles, PlacementParams};
use crate::render::{CommandRecorder, ElementLog};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn portfolio() -> Vec<SkillEntry> {
        ["React", "Next.js", "TypeScript", "JavaScript", "Node.js", "Python", "Git", "Docker"]
            .iter()
            .map(|name| SkillEntry::new(*name, 80, "test"))
            .collect()
    }

    fn run_cloud(cloud: &mut BubbleCloud, clock: &ManualClock, log: &mut ElementLog, frames: usize) {
        for _ in 0..frames {
            clock.advance(FRAME_MS);
            cloud.frame(clock.now_ms(), log).unwrap();
        }
    }

    #[test]
    fn test_starfield_depths_stay_in_range_for_1000_ticks() {
        let config = StarfieldConfig::new()
            .with_star_count(100)
            .with_base_speed(0.02)
            .with_fov(300.0);
        let mut starfield = Starfield::new(config).unwrap();
        let viewport = Viewport::new(800.0, 600.0);
        let mut surface = CommandRecorder::new(800, 600);
        let clock = ManualClock::starting_at(0.0);

        starfield.mount(viewport, clock.now_ms()).unwrap();
        for _ in 0..1000 {
            clock.advance(FRAME_MS);
            assert_eq!(starfield.frame(clock.now_ms(), &mut surface).unwrap(), FrameOutcome::Rendered);
            surface.take();
        }

        let max_depth = viewport.max_depth();
        assert_eq!(starfield.stars().len(), 100);
        for star in starfield.stars() {
            assert!(star.depth > 0.0 && star.depth <= max_depth, "depth {} out of range", star.depth);
        }
    }

    #[test]
    fn test_fast_stars_recycle_to_far_plane() {
        // Speed larger than the far plane: every star recycles on the first tick
        let config = StarfieldConfig::new().with_star_count(20).with_base_speed(1000.0);
        let mut starfield = Starfield::new(config).unwrap();
        let viewport = Viewport::new(300.0, 500.0);
        starfield.mount(viewport, 0.0).unwrap();

        let mut surface = CommandRecorder::new(300, 500);
        starfield.frame(16.0, &mut surface).unwrap();
        for star in starfield.stars() {
            assert_relative_eq!(star.depth, 500.0);
            assert!((-1.0..=1.0).contains(&star.position.x));
            assert!((-1.0..=1.0).contains(&star.position.y));
        }
    }

    #[test]
    fn test_head_on_bubbles_swap_and_separate() {
        let skills = [SkillEntry::new("A", 1, "t"), SkillEntry::new("B", 1, "t")];
        let mut pair = vec![
            Bubble::new(BubbleId::for_skill(0, &skills[0]), skills[0].clone(), Vec2::new(40.0, 50.0), 5.0)
                .with_velocity(Vec2::new(1.0, 0.0)),
            Bubble::new(BubbleId::for_skill(1, &skills[1]), skills[1].clone(), Vec2::new(48.0, 50.0), 5.0)
                .with_velocity(Vec2::new(-1.0, 0.0)),
        ];

        step_bubbles(&mut pair, &CloudBounds::percent(1.0));
        assert_relative_eq!(pair[0].velocity, Vec2::new(-1.0, 0.0));
        assert_relative_eq!(pair[1].velocity, Vec2::new(1.0, 0.0));
        let distance = (pair[1].position - pair[0].position).norm();
        assert!(distance >= 10.0 - 1e-4);
    }

    #[test]
    fn test_pop_react_then_respawn() {
        let clock = ManualClock::starting_at(0.0);
        let mut cloud = BubbleCloud::new(BubbleCloudConfig::new().with_seed(2024), portfolio()).unwrap();
        cloud.mount(Viewport::new(1280.0, 720.0), clock.now_ms()).unwrap();
        let mut log = ElementLog::new();
        run_cloud(&mut cloud, &clock, &mut log, 10);

        let react = cloud.find_by_name("React").unwrap().id.clone();
        assert_eq!(cloud.bubble(&react).unwrap().pop_count, 0);

        let outcome = cloud.pop(&react, clock.now_ms()).unwrap();
        assert!(matches!(outcome, PopOutcome::Popped { pop_count: 1, .. }));
        let popped = cloud.bubble(&react).unwrap().clone();
        assert!(popped.is_popping());
        assert_eq!(popped.velocity, Vec2::zeros());
        assert_relative_eq!(popped.target_scale, 0.0);

        // Frozen while popped, invisible and not interactive
        run_cloud(&mut cloud, &clock, &mut log, 60);
        assert_eq!(cloud.bubble(&react).unwrap().position, popped.position);
        let element = log.find(&react).unwrap();
        assert_relative_eq!(element.opacity, 0.0);
        assert!(!element.interactive);
        assert_eq!(element.badge, Some(1));
        assert_eq!(element.aria_label, "React skill bubble, popped 1 times");

        // 1500 ms after the pop
        run_cloud(&mut cloud, &clock, &mut log, 40);
        let respawned = cloud.bubble(&react).unwrap();
        assert!(!respawned.is_popping());
        assert_relative_eq!(respawned.target_scale, 1.0);
        assert!(respawned.velocity.norm() > 0.0);
        assert_eq!(respawned.pop_count, 1);
        assert!(respawned.respawn.is_none());

        let events = cloud.drain_events();
        assert!(events.contains(&EngineEvent::Popped { id: react.clone(), pop_count: 1 }));
        assert!(events.contains(&EngineEvent::Respawned { id: react }));
    }

    #[test]
    fn test_centers_stay_in_padding_while_running() {
        let clock = ManualClock::starting_at(0.0);
        let config = BubbleCloudConfig::new().with_seed(77).with_wall_padding(2.0);
        let mut cloud = BubbleCloud::new(config, portfolio()).unwrap();
        cloud.mount(Viewport::new(600.0, 600.0).with_window_width(1400.0), 0.0).unwrap();
        let mut log = ElementLog::new();

        for _ in 0..600 {
            run_cloud(&mut cloud, &clock, &mut log, 1);
            for bubble in cloud.bubbles() {
                assert!((2.0..=98.0).contains(&bubble.position.x));
                assert!((2.0..=98.0).contains(&bubble.position.y));
            }
        }
    }

    #[test]
    fn test_entrance_animation() {
        let mut cloud = BubbleCloud::new(BubbleCloudConfig::new().with_seed(5), portfolio()).unwrap();
        cloud.mount(Viewport::new(1000.0, 700.0), 1000.0).unwrap();
        let mut log = ElementLog::new();

        cloud.frame(1016.0, &mut log).unwrap();
        assert!(log.last().unwrap().iter().all(|e| e.scale == 0.0));

        cloud.frame(1101.0, &mut log).unwrap();
        assert!(log.last().unwrap().iter().all(|e| e.scale == 1.0));
    }

    #[test]
    fn test_unmount_cancels_everything() {
        let mut cloud = BubbleCloud::new(BubbleCloudConfig::new().with_seed(9), portfolio()).unwrap();
        cloud.mount(Viewport::new(800.0, 600.0), 0.0).unwrap();
        let first = cloud.bubbles()[0].id.clone();
        let second = cloud.bubbles()[1].id.clone();
        cloud.pop(&first, 10.0).unwrap();
        cloud.pop(&second, 20.0).unwrap();
        assert_eq!(cloud.pending_tasks(), 3);

        cloud.unmount().unwrap();
        assert_eq!(cloud.state(), LifecycleState::Disposed);
        assert_eq!(cloud.pending_tasks(), 0);
        assert!(!cloud.is_frame_requested());
        assert!(cloud.bubbles().is_empty());

        let mut log = ElementLog::new();
        assert!(matches!(cloud.frame(5000.0, &mut log), Err(EngineError::Disposed)));
        assert!(matches!(cloud.pop(&first, 5000.0), Err(EngineError::Disposed)));
        assert!(matches!(cloud.hover(&first, true), Err(EngineError::Disposed)));
        assert!(matches!(cloud.resize(Viewport::new(1.0, 1.0)), Err(EngineError::Disposed)));
        assert!(matches!(cloud.mount(Viewport::new(1.0, 1.0), 0.0), Err(EngineError::Disposed)));
        assert_eq!(log.frame_count(), 0);
    }

    #[test]
    fn test_placement_count_for_any_n() {
        let mut rng = StdRng::seed_from_u64(31);
        for n in 0..=30 {
            let params = PlacementParams::percent(1.0, 1.1, 20, n);
            let placed = place_circles(n, &params, &mut rng, |r| r.gen_range(2.0..6.0));
            assert_eq!(placed.len(), n);
        }
    }
}
