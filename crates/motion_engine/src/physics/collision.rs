//! Circle collision primitives
//!
//! Narrow-phase tests for the 2D bubble cloud. There is no broad phase: the
//! cloud holds a handful of bubbles, so every unordered pair is tested.

use crate::foundation::math::Vec2;

/// A bounding circle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// The center position of the circle
    pub center: Vec2,
    /// The radius of the circle
    pub radius: f32,
}

/// Contact between two overlapping circles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first circle towards the second
    pub normal: Vec2,
    /// How far the circles overlap
    pub penetration: f32,
}

impl BoundingCircle {
    /// Creates a new bounding circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this circle overlaps another. Touching circles do not overlap.
    pub fn overlaps(&self, other: &BoundingCircle) -> bool {
        let radius_sum = self.radius + other.radius;
        (other.center - self.center).norm_squared() < radius_sum * radius_sum
    }

    /// Contact normal and depth, if overlapping.
    ///
    /// Coincident centers separate along +x.
    pub fn contact(&self, other: &BoundingCircle) -> Option<Contact> {
        let delta = other.center - self.center;
        let distance = delta.norm();
        let radius_sum = self.radius + other.radius;
        if distance >= radius_sum {
            return None;
        }

        let normal = if distance > f32::EPSILON {
            delta / distance
        } else {
            Vec2::x()
        };
        Some(Contact {
            normal,
            penetration: radius_sum - distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_overlap_is_strict() {
        let a = BoundingCircle::new(Vec2::new(0.0, 0.0), 1.0);
        let touching = BoundingCircle::new(Vec2::new(2.0, 0.0), 1.0);
        let inside = BoundingCircle::new(Vec2::new(1.5, 0.0), 1.0);

        assert!(!a.overlaps(&touching));
        assert!(a.contact(&touching).is_none());
        assert!(a.overlaps(&inside));
    }

    #[test]
    fn test_contact_normal_and_depth() {
        let a = BoundingCircle::new(Vec2::new(0.0, 0.0), 2.0);
        let b = BoundingCircle::new(Vec2::new(0.0, 3.0), 2.0);
        let contact = a.contact(&b).unwrap();

        assert_relative_eq!(contact.normal, Vec2::new(0.0, 1.0));
        assert_relative_eq!(contact.penetration, 1.0);
    }

    #[test]
    fn test_coincident_centers_use_x_axis() {
        let a = BoundingCircle::new(Vec2::new(5.0, 5.0), 1.0);
        let contact = a.contact(&a).unwrap();
        assert_relative_eq!(contact.normal, Vec2::x());
        assert_relative_eq!(contact.penetration, 2.0);
    }
}
