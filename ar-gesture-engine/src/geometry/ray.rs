use bevy::prelude::*;
use constants::hit_test_settings::MIN_PLANE_RAY_SLOPE;

/// A world-space hit-test ray. Ephemeral, rebuilt per query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl HitTestRay {
    /// Normalizes the direction; `None` for a zero-length direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Intersects a ray with the borderless horizontal plane `y = plane_y`.
///
/// A horizontal ray lying exactly on the plane intersects it everywhere,
/// so the ray origin is returned. Rays that are near-parallel to the
/// plane or pointing upward are rejected, as are intersections behind
/// the ray origin.
pub fn ray_intersection_with_horizontal_plane(ray: &HitTestRay, plane_y: f32) -> Option<Vec3> {
    let direction = ray.direction.try_normalize()?;

    if direction.y == 0.0 {
        return (ray.origin.y == plane_y).then_some(ray.origin);
    }

    if direction.y >= MIN_PLANE_RAY_SLOPE {
        return None;
    }

    // The plane normal is (0, 1, 0), so the general ray/plane solution
    // collapses to a single division.
    let t = (plane_y - ray.origin.y) / direction.y;
    if t < 0.0 {
        return None;
    }

    Some(ray.origin + direction * t)
}
