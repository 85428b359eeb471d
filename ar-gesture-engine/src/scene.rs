//! Scene query port. The engine reaches the renderer and the tracking
//! session only through [`SceneQuery`], installed by the host as the
//! [`SceneQueryProvider`] resource; every engine system is a no-op
//! while the provider is absent.

use bevy::prelude::*;

use crate::geometry::HitTestRay;
use crate::objects::VirtualObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaneAnchorId(pub u64);

/// A hit against a detected plane anchor, within its extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneHit {
    pub position: Vec3,
    pub anchor: PlaneAnchorId,
}

pub trait SceneQuery {
    fn plane_hit_test(&self, screen_point: Vec2) -> Option<PlaneHit>;

    /// Bounding-box-only. When several objects overlap the point, any
    /// ordering is acceptable as long as it is deterministic within a
    /// frame.
    fn object_hit_test(&self, screen_point: Vec2) -> Option<VirtualObjectId>;

    fn project_to_screen(&self, world_position: Vec3) -> Vec2;

    /// `None` while no frame is available.
    fn camera_position(&self) -> Option<Vec3>;

    /// `None` while no frame is available.
    fn unproject_to_far_plane(&self, screen_point: Vec2) -> Option<Vec3>;

    /// Sparse reconstruction points. May be empty.
    fn raw_feature_points(&self) -> Vec<Vec3>;
}

#[derive(Resource)]
pub struct SceneQueryProvider(pub Box<dyn SceneQuery + Send + Sync>);

impl SceneQueryProvider {
    pub fn new(query: impl SceneQuery + Send + Sync + 'static) -> Self {
        Self(Box::new(query))
    }

    pub fn scene(&self) -> &dyn SceneQuery {
        self.0.as_ref()
    }
}

/// Ray from the camera through the unprojected far-plane point. `None`
/// while the scene has no current frame.
pub fn hit_test_ray_from_screen_pos(
    scene: &dyn SceneQuery,
    screen_point: Vec2,
) -> Option<HitTestRay> {
    let origin = scene.camera_position()?;
    let far_point = scene.unproject_to_far_plane(screen_point)?;
    HitTestRay::new(origin, far_point - origin)
}
