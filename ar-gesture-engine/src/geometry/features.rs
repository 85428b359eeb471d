use bevy::prelude::*;

use super::ray::HitTestRay;

/// A single hit against the sparse feature point cloud. The hit
/// position is the foot of the perpendicular from the feature point
/// onto the ray, not the feature point itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureHitTestResult {
    pub position: Vec3,
    pub distance_to_ray_origin: f32,
    pub feature_hit: Vec3,
    pub feature_distance_to_hit_result: f32,
}

fn hit_against_feature(ray: &HitTestRay, feature: Vec3) -> FeatureHitTestResult {
    let origin_to_feature = feature - ray.origin;

    // Perpendicular distance of the feature from the ray is the length of
    // the cross product with the (unit) ray direction.
    let feature_distance = origin_to_feature.cross(ray.direction).length();

    let position = ray.point_at(ray.direction.dot(origin_to_feature));
    let distance_to_ray_origin = (position - ray.origin).length();

    FeatureHitTestResult {
        position,
        distance_to_ray_origin,
        feature_hit: feature,
        feature_distance_to_hit_result: feature_distance,
    }
}

/// Scans the whole cloud for the single feature closest to the ray.
/// O(n); `None` for an empty cloud.
pub fn nearest_feature_to_ray(
    ray: &HitTestRay,
    features: &[Vec3],
) -> Option<FeatureHitTestResult> {
    let mut closest: Option<(Vec3, f32)> = None;

    for &feature in features {
        let distance = (feature - ray.origin).cross(ray.direction).length();
        match closest {
            Some((_, best)) if distance >= best => {}
            _ => closest = Some((feature, distance)),
        }
    }

    closest.map(|(feature, _)| hit_against_feature(ray, feature))
}

/// Cone-filtered hit test: features within `[min_distance,
/// max_distance]` along the ray and within half the opening angle of
/// its direction, sorted ascending by distance to the ray origin and
/// capped to `max_results`.
pub fn hit_test_with_features(
    ray: &HitTestRay,
    features: &[Vec3],
    cone_opening_angle_deg: f32,
    min_distance: f32,
    max_distance: f32,
    max_results: usize,
) -> Vec<FeatureHitTestResult> {
    let max_angle = (cone_opening_angle_deg.min(360.0) / 2.0).to_radians();

    let mut results = Vec::new();
    for &feature in features {
        let hit = hit_against_feature(ray, feature);

        if hit.distance_to_ray_origin < min_distance
            || hit.distance_to_ray_origin > max_distance
        {
            // Too close or too far away.
            continue;
        }

        let Some(to_feature) = (feature - ray.origin).try_normalize() else {
            continue;
        };
        let angle = ray.direction.dot(to_feature).clamp(-1.0, 1.0).acos();
        if angle > max_angle {
            // Outside the hit test cone.
            continue;
        }

        results.push(hit);
    }

    results.sort_by(|a, b| a.distance_to_ray_origin.total_cmp(&b.distance_to_ray_origin));
    results.truncate(max_results);
    results
}
