//! Bounding volumes and intersection tests
//!
//! Everything post-prepare is sphere versus sphere. Boxes exist only so an
//! entity with box-shaped geometry (a wall) can derive a world-space bounding
//! sphere once, at prepare time. Tangency counts as a hit, and a zero radius
//! is a legal point collider.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A collision sphere: center plus radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Copy of this sphere moved by `offset`
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            center: self.center + offset,
            radius: self.radius,
        }
    }

    /// Inclusive overlap test: centers exactly `r1 + r2` apart still hit
    pub fn intersects(&self, other: &Sphere) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }
}

/// An axis-aligned box, used only at prepare time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Smallest sphere enclosing the box (radius = half diagonal)
    pub fn bounding_sphere(&self) -> Sphere {
        Sphere {
            center: self.center(),
            radius: (self.max - self.min).length() * 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sphere_overlap() {
        let a = Sphere::new(Vec3::ZERO, 1.0);
        let b = Sphere::new(Vec3::new(1.5, 0.0, 0.0), 1.0);
        assert!(a.intersects(&b));

        let far = Sphere::new(Vec3::new(3.0, 0.0, 0.0), 0.5);
        assert!(!a.intersects(&far));
    }

    #[test]
    fn test_tangency_is_a_hit() {
        // Centers exactly r1 + r2 apart
        let a = Sphere::new(Vec3::ZERO, 1.0);
        let b = Sphere::new(Vec3::new(3.0, 0.0, 0.0), 2.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_zero_radius_is_a_point() {
        let point = Sphere::new(Vec3::new(0.5, 0.0, 0.0), 0.0);
        let ball = Sphere::new(Vec3::ZERO, 1.0);
        assert!(ball.intersects(&point));

        let outside = Sphere::new(Vec3::new(1.1, 0.0, 0.0), 0.0);
        assert!(!ball.intersects(&outside));
    }

    #[test]
    fn test_translated_keeps_radius() {
        let s = Sphere::new(Vec3::ZERO, 0.75);
        let moved = s.translated(Vec3::new(1.0, -2.0, 0.0));
        assert_eq!(moved.radius, 0.75);
        assert_eq!(moved.center, Vec3::new(1.0, -2.0, 0.0));
        // Original untouched
        assert_eq!(s.center, Vec3::ZERO);
    }

    #[test]
    fn test_aabb_bounding_sphere() {
        let unit = Aabb::from_center_size(Vec3::new(2.0, 3.0, 0.0), Vec3::ONE);
        let sphere = unit.bounding_sphere();
        assert_eq!(sphere.center, Vec3::new(2.0, 3.0, 0.0));
        // Half diagonal of a unit cube
        assert!((sphere.radius - 3.0_f32.sqrt() / 2.0).abs() < 1e-6);
    }

    fn arb_sphere() -> impl Strategy<Value = Sphere> {
        (
            -100.0_f32..100.0,
            -100.0_f32..100.0,
            -100.0_f32..100.0,
            0.0_f32..10.0,
        )
            .prop_map(|(x, y, z, r)| Sphere::new(Vec3::new(x, y, z), r))
    }

    proptest! {
        #[test]
        fn prop_intersection_symmetric(a in arb_sphere(), b in arb_sphere()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_self_intersection(a in arb_sphere()) {
            prop_assert!(a.intersects(&a));
        }

        #[test]
        fn prop_containment_hits(a in arb_sphere(), shrink in 0.0_f32..1.0) {
            // A sphere concentric with a and no larger always intersects it
            let inner = Sphere::new(a.center, a.radius * shrink);
            prop_assert!(a.intersects(&inner));
        }
    }
}
