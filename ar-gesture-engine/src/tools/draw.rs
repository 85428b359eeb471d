//! Fingertip drawing trail.
//!
//! Consumes fingertip samples from the host's hand tracker and accretes
//! a polyline of world points on the detected surface under the tip.
//! Samples jitter by a pixel or two, so points closer than
//! [`DRAW_POINT_SPACING`] to the last one are dropped.

use bevy::prelude::*;
use constants::hit_test_settings::{DRAW_POINT_SPACING, TRACKED_TIP_SCREEN_OFFSET};

use crate::placement::resolve_world_position;
use crate::scene::{SceneQuery, SceneQueryProvider};

/// One detected fingertip position, in screen coordinates. The detector
/// reports the visual tip centre; [`TRACKED_TIP_SCREEN_OFFSET`] is added
/// before hit testing so strokes land under the fingertip rather than
/// under the detection box.
#[derive(Event, Debug, Clone, Copy)]
pub struct FingertipSampleEvent {
    pub screen_position: Vec2,
}

#[derive(Resource, Default)]
pub struct DrawTrail {
    active: bool,
    points: Vec<Vec3>,
}

impl DrawTrail {
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn push_point(&mut self, world_position: Vec3) {
        if let Some(&last) = self.points.last() {
            if (world_position - last).length() < DRAW_POINT_SPACING {
                return;
            }
        }
        self.points.push(world_position);
    }

    /// Resolves one fingertip sample against detected planes only and
    /// extends the trail. Samples over uncovered space are dropped.
    pub fn extend(&mut self, scene: &dyn SceneQuery, tip_screen_position: Vec2) {
        let screen_point = tip_screen_position + TRACKED_TIP_SCREEN_OFFSET;
        let placement = resolve_world_position(scene, screen_point, None, false);
        if let Some(position) = placement.position {
            self.push_point(position);
        }
    }
}

pub fn extend_draw_trail(
    mut trail: ResMut<DrawTrail>,
    mut samples: EventReader<FingertipSampleEvent>,
    scene: Option<Res<SceneQueryProvider>>,
) {
    if !trail.is_active() {
        samples.clear();
        return;
    }
    let Some(scene) = scene else {
        samples.clear();
        return;
    };

    for sample in samples.read() {
        trail.extend(scene.scene(), sample.screen_position);
    }
}

pub struct DrawTrailPlugin;

impl Plugin for DrawTrailPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawTrail>()
            .add_event::<FingertipSampleEvent>()
            .add_systems(Update, extend_draw_trail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::PlaneAnchorId;
    use crate::scene::fixture::FixtureScene;

    #[test]
    fn samples_accrete_into_a_spaced_trail() {
        let scene = FixtureScene {
            ground_plane: Some(PlaneAnchorId(1)),
            ..Default::default()
        };
        let mut trail = DrawTrail::default();
        trail.set_active(true);

        let tip = Vec2::new(50.0, 50.0) - TRACKED_TIP_SCREEN_OFFSET;
        trail.extend(&scene, tip);
        assert_eq!(trail.points().len(), 1);
        assert!((trail.points()[0] - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-4);

        // Sub-spacing jitter is ignored, 0.01 screen units is 0.0001 m.
        trail.extend(&scene, tip + Vec2::new(0.01, 0.0));
        assert_eq!(trail.points().len(), 1);

        // A real move appends.
        trail.extend(&scene, tip + Vec2::new(10.0, 0.0));
        assert_eq!(trail.points().len(), 2);
        assert!((trail.points()[1] - Vec3::new(0.6, 0.0, 0.5)).length() < 1e-4);
    }

    #[test]
    fn samples_without_plane_coverage_are_dropped() {
        // No detected plane anywhere: resolution must not invent a
        // surface, even though the camera frame is available.
        let scene = FixtureScene::default();
        let mut trail = DrawTrail::default();
        trail.set_active(true);

        trail.extend(&scene, Vec2::new(50.0, 50.0));
        trail.extend(&scene, Vec2::new(60.0, 50.0));
        assert!(trail.points().is_empty());
    }

    #[test]
    fn trail_resumes_where_plane_coverage_resumes() {
        let mut scene = FixtureScene {
            ground_plane: Some(PlaneAnchorId(1)),
            ..Default::default()
        };
        let mut trail = DrawTrail::default();
        trail.set_active(true);

        let tip = Vec2::new(50.0, 50.0) - TRACKED_TIP_SCREEN_OFFSET;
        trail.extend(&scene, tip);

        scene.ground_plane = None;
        trail.extend(&scene, tip + Vec2::new(10.0, 0.0));
        assert_eq!(trail.points().len(), 1);

        scene.ground_plane = Some(PlaneAnchorId(1));
        trail.extend(&scene, tip + Vec2::new(20.0, 0.0));
        assert_eq!(trail.points().len(), 2);
        assert!((trail.points()[1] - Vec3::new(0.7, 0.0, 0.5)).length() < 1e-4);
    }

    #[test]
    fn clear_resets_the_trail() {
        let mut trail = DrawTrail::default();
        trail.push_point(Vec3::ZERO);
        trail.push_point(Vec3::ONE);
        trail.clear();
        assert!(trail.points().is_empty());
    }
}
