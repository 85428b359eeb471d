use bevy::math::Vec2;

/// Rays whose vertical direction component is at or above this value are
/// rejected by the infinite horizontal plane hit test: near-parallel or
/// upward rays produce numerically unstable or physically implausible hits.
pub const MIN_PLANE_RAY_SLOPE: f32 = -0.03;

/// Plane height used for the infinite-plane fallback when no reference
/// object height is available.
pub const DEFAULT_GROUND_HEIGHT: f32 = 0.0;

/// Opening angle of the feature-point hit test cone, in degrees.
pub const FEATURE_CONE_OPENING_ANGLE_DEG: f32 = 18.0;
/// Feature hits closer to the camera than this are discarded.
pub const FEATURE_MIN_DISTANCE: f32 = 0.2;
/// Feature hits further from the camera than this are discarded.
pub const FEATURE_MAX_DISTANCE: f32 = 3.0;

/// Screen-space offset from a tracked fingertip's bounding-box origin to
/// the point actually hit-tested while drawing.
pub const TRACKED_TIP_SCREEN_OFFSET: Vec2 = Vec2::new(-20.0, 40.0);

/// Minimum world-space spacing between consecutive trail points.
pub const DRAW_POINT_SPACING: f32 = 0.002;
