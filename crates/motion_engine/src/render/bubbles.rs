//! Bubble element layout
//!
//! Converts bubbles from container percent into positioned circular elements
//! in pixels, together with the per-element presentation state (stacking,
//! highlight, badge, tooltip and accessible label).

use crate::core::viewport::Viewport;
use crate::entities::bubble::{Bubble, BubbleId};
use crate::foundation::math::{Rgba, Vec2};
use crate::render::{CommandRecorder, RasterSurface, Surface};

/// Stacking order of a hovered bubble
pub const Z_HOVERED: i32 = 10;
/// Stacking order of a resting bubble
pub const Z_RESTING: i32 = 1;
/// Stacking order of a popped bubble
pub const Z_POPPING: i32 = 0;

/// Hover details of a bubble
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Skill name
    pub title: String,
    /// Skill description, if any
    pub description: Option<String>,
}

/// A laid-out bubble, in pixels
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleElement {
    /// Bubble the element belongs to
    pub id: BubbleId,
    /// Text shown inside the bubble
    pub label: String,
    /// Left edge
    pub left: f32,
    /// Top edge
    pub top: f32,
    /// Unscaled diameter
    pub diameter: f32,
    /// Scale the element animates towards
    pub scale: f32,
    /// 0 while popped, 1 otherwise
    pub opacity: f32,
    /// Stacking order
    pub z_index: i32,
    /// Collided this tick
    pub highlighted: bool,
    /// Accepts pointer and keyboard input
    pub interactive: bool,
    /// Pop counter, shown once the bubble has been popped
    pub badge: Option<u32>,
    /// Shown while hovered
    pub tooltip: Option<Tooltip>,
    /// Screen reader label
    pub aria_label: String,
}

impl BubbleElement {
    /// Center in pixels
    pub fn center(&self) -> Vec2 {
        let half = self.diameter * 0.5;
        Vec2::new(self.left + half, self.top + half)
    }
}

/// Target that receives the laid-out bubbles once per frame
pub trait BubbleSurface {
    /// Present this frame's elements, in store order
    fn present(&mut self, elements: &[BubbleElement]);
}

/// Lay out every bubble for a container of `viewport` size
pub fn layout_bubbles(bubbles: &[Bubble], viewport: &Viewport, min_diameter_px: f32) -> Vec<BubbleElement> {
    bubbles
        .iter()
        .map(|bubble| layout_bubble(bubble, viewport, min_diameter_px))
        .collect()
}

fn layout_bubble(bubble: &Bubble, viewport: &Viewport, min_diameter_px: f32) -> BubbleElement {
    let diameter = (2.0 * bubble.radius * viewport.width / 100.0).max(min_diameter_px);
    let left = bubble.position.x * viewport.width / 100.0 - diameter * 0.5;
    let top = bubble.position.y * viewport.height / 100.0 - diameter * 0.5;

    let popping = bubble.is_popping();
    let z_index = if bubble.is_hovered() {
        Z_HOVERED
    } else if popping {
        Z_POPPING
    } else {
        Z_RESTING
    };

    BubbleElement {
        id: bubble.id.clone(),
        label: bubble.skill.name.clone(),
        left,
        top,
        diameter,
        scale: bubble.target_scale,
        opacity: if popping { 0.0 } else { 1.0 },
        z_index,
        highlighted: bubble.is_colliding(),
        interactive: !popping,
        badge: (bubble.pop_count > 0).then_some(bubble.pop_count),
        tooltip: bubble.is_hovered().then(|| Tooltip {
            title: bubble.skill.name.clone(),
            description: bubble.skill.description.clone(),
        }),
        aria_label: bubble.accessible_label(),
    }
}

const BODY: Rgba = Rgba { r: 0x25, g: 0x63, b: 0xEB, a: 0.45 };
const RIM: Rgba = Rgba { r: 0x3B, g: 0x82, b: 0xF6, a: 0.5 };
const RIM_HIGHLIGHT: Rgba = Rgba { r: 0x93, g: 0xC5, b: 0xFD, a: 1.0 };
const BADGE: Rgba = Rgba { r: 0x3B, g: 0x82, b: 0xF6, a: 1.0 };

/// Draw elements as filled circles, lowest stacking order first
pub fn draw_bubbles<S: Surface + ?Sized>(surface: &mut S, elements: &[BubbleElement]) {
    let mut ordered: Vec<&BubbleElement> = elements.iter().collect();
    ordered.sort_by_key(|e| e.z_index);

    for element in ordered {
        if element.opacity <= 0.0 || element.scale <= 0.0 {
            continue;
        }
        // Colliding bubbles grow slightly and get a bright rim
        let grow = if element.highlighted { 1.05 } else { 1.0 };
        let radius = element.diameter * 0.5 * element.scale * grow;
        let center = element.center();
        let (rim, rim_width) = if element.highlighted { (RIM_HIGHLIGHT, 2.0) } else { (RIM, 1.0) };

        surface.fill_circle(center, radius, rim.with_alpha(rim.a * element.opacity));
        surface.fill_circle(center, (radius - rim_width).max(0.0), BODY.with_alpha(BODY.a * element.opacity));

        if element.badge.is_some() {
            let corner = center + Vec2::new(radius, -radius) * std::f32::consts::FRAC_1_SQRT_2;
            surface.fill_circle(corner, (radius * 0.2).max(3.0), BADGE);
        }
    }
}

impl BubbleSurface for RasterSurface {
    fn present(&mut self, elements: &[BubbleElement]) {
        draw_bubbles(self, elements);
    }
}

impl BubbleSurface for CommandRecorder {
    fn present(&mut self, elements: &[BubbleElement]) {
        draw_bubbles(self, elements);
    }
}

/// Collects the elements of every presented frame
#[derive(Debug, Clone, Default)]
pub struct ElementLog {
    frames: Vec<Vec<BubbleElement>>,
}

impl ElementLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of presented frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Elements of the most recent frame
    pub fn last(&self) -> Option<&[BubbleElement]> {
        self.frames.last().map(Vec::as_slice)
    }

    /// Element of `id` in the most recent frame
    pub fn find(&self, id: &BubbleId) -> Option<&BubbleElement> {
        self.last()?.iter().find(|e| &e.id == id)
    }
}

impl BubbleSurface for ElementLog {
    fn present(&mut self, elements: &[BubbleElement]) {
        self.frames.push(elements.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SkillEntry;
    use crate::entities::bubble::BubbleFlags;
    use crate::render::DrawCommand;
    use approx::assert_relative_eq;

    fn react(radius: f32) -> Bubble {
        let skill = SkillEntry::new("React", 90, "frontend").with_description("Component-based UI library");
        Bubble::new(BubbleId::for_skill(0, &skill), skill, Vec2::new(50.0, 25.0), radius)
    }

    #[test]
    fn test_layout_geometry() {
        let viewport = Viewport::new(1000.0, 400.0);
        let elements = layout_bubbles(&[react(5.0)], &viewport, 30.0);
        let e = &elements[0];

        assert_relative_eq!(e.diameter, 100.0);
        assert_relative_eq!(e.left, 450.0);
        assert_relative_eq!(e.top, 50.0);
        assert_relative_eq!(e.center(), Vec2::new(500.0, 100.0));
        assert_eq!(e.z_index, Z_RESTING);
        assert!(e.interactive && e.badge.is_none() && e.tooltip.is_none());
        assert_eq!(e.aria_label, "React skill bubble, popped 0 times");
    }

    #[test]
    fn test_small_containers_use_minimum_diameter() {
        let viewport = Viewport::new(200.0, 200.0);
        let e = &layout_bubbles(&[react(3.0)], &viewport, 30.0)[0];
        assert_relative_eq!(e.diameter, 30.0);
    }

    #[test]
    fn test_presentation_state() {
        let viewport = Viewport::new(1000.0, 1000.0);

        let mut hovered = react(5.0);
        hovered.flags.insert(BubbleFlags::HOVERED | BubbleFlags::COLLIDING);
        hovered.pop_count = 2;
        let e = &layout_bubbles(&[hovered], &viewport, 30.0)[0];
        assert_eq!(e.z_index, Z_HOVERED);
        assert!(e.highlighted);
        assert_eq!(e.badge, Some(2));
        let tooltip = e.tooltip.as_ref().unwrap();
        assert_eq!(tooltip.title, "React");
        assert_eq!(tooltip.description.as_deref(), Some("Component-based UI library"));

        let mut popped = react(5.0);
        popped.flags.insert(BubbleFlags::POPPING);
        popped.target_scale = 0.0;
        let e = &layout_bubbles(&[popped], &viewport, 30.0)[0];
        assert_eq!(e.z_index, Z_POPPING);
        assert_relative_eq!(e.opacity, 0.0);
        assert!(!e.interactive);
    }

    #[test]
    fn test_popped_elements_are_not_drawn() {
        let viewport = Viewport::new(1000.0, 1000.0);
        let mut popped = react(5.0);
        popped.flags.insert(BubbleFlags::POPPING);
        let elements = layout_bubbles(&[react(5.0), popped], &viewport, 30.0);

        let mut recorder = CommandRecorder::new(1000, 1000);
        recorder.present(&elements);
        // Rim and body of the resting bubble only
        assert_eq!(recorder.commands().len(), 2);
        assert!(recorder
            .commands()
            .iter()
            .all(|c| matches!(c, DrawCommand::Circle { center, .. } if (center.x - 500.0).abs() < 1e-3)));
    }

    #[test]
    fn test_element_log_keeps_frames() {
        let viewport = Viewport::new(500.0, 500.0);
        let bubble = react(5.0);
        let id = bubble.id.clone();

        let mut log = ElementLog::new();
        log.present(&layout_bubbles(&[bubble], &viewport, 30.0));
        assert_eq!(log.frame_count(), 1);
        assert_eq!(log.find(&id).map(|e| e.label.as_str()), Some("React"));
    }
}
