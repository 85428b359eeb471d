//! Resolves screen points to world positions for placing and moving
//! objects. Detected plane anchors are authoritative; the borderless
//! plane at the object's height is a dragging-only fallback.

use bevy::prelude::*;
use constants::hit_test_settings::DEFAULT_GROUND_HEIGHT;

use crate::geometry::ray::ray_intersection_with_horizontal_plane;
use crate::objects::{VirtualObjectId, VirtualObjectTable};
use crate::scene::{PlaneAnchorId, SceneQuery, hit_test_ray_from_screen_pos};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldPlacement {
    pub position: Option<Vec3>,
    pub plane: Option<PlaneAnchorId>,
    /// True only when a real detected plane was hit.
    pub hit_plane: bool,
}

impl WorldPlacement {
    const MISS: Self = Self {
        position: None,
        plane: None,
        hit_plane: false,
    };
}

/// Emitted when an instant move (tap-to-teleport or drop) found no
/// surface at the target point. The host surfaces it as a "cannot
/// place object" message.
#[derive(Event, Debug, Clone, Copy)]
pub struct PlacementFailedEvent {
    pub object: VirtualObjectId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslateOutcome {
    Moved,
    /// No surface this tick; the object was left where it is.
    NoUpdate,
    /// An instant move found no surface. Must surface to the user.
    Failed,
}

/// Plane anchors win. When none is hit and `infinite_plane` is set, the
/// ray is intersected with a borderless horizontal plane at the
/// reference object's height (ground height without a reference).
pub fn resolve_world_position(
    scene: &dyn SceneQuery,
    screen_point: Vec2,
    object_pos: Option<Vec3>,
    infinite_plane: bool,
) -> WorldPlacement {
    if let Some(hit) = scene.plane_hit_test(screen_point) {
        // Best possible outcome, return immediately.
        return WorldPlacement {
            position: Some(hit.position),
            plane: Some(hit.anchor),
            hit_plane: true,
        };
    }

    if infinite_plane {
        let plane_y = object_pos.map_or(DEFAULT_GROUND_HEIGHT, |p| p.y);
        let position = hit_test_ray_from_screen_pos(scene, screen_point)
            .and_then(|ray| ray_intersection_with_horizontal_plane(&ray, plane_y));
        return WorldPlacement {
            position,
            plane: None,
            hit_plane: false,
        };
    }

    WorldPlacement::MISS
}

/// Moves an object to the world position resolved from `screen_pos`.
/// Continuous moves quietly skip the tick on a miss; instant moves
/// report [`TranslateOutcome::Failed`] so the caller can emit a
/// [`PlacementFailedEvent`].
pub fn translate_object(
    scene: &dyn SceneQuery,
    table: &mut VirtualObjectTable,
    object: VirtualObjectId,
    screen_pos: Vec2,
    instantly: bool,
    infinite_plane: bool,
) -> TranslateOutcome {
    let object_pos = table.get(object).map(|t| t.position);
    let placement = resolve_world_position(scene, screen_pos, object_pos, infinite_plane);

    let Some(position) = placement.position else {
        return if instantly {
            TranslateOutcome::Failed
        } else {
            TranslateOutcome::NoUpdate
        };
    };

    let Some(transform) = table.get_mut(object) else {
        return TranslateOutcome::NoUpdate;
    };
    transform.position = position;
    TranslateOutcome::Moved
}

pub fn log_placement_failures(mut events: EventReader<PlacementFailedEvent>) {
    for event in events.read() {
        warn!(
            "cannot place object {:?}: no plane at the target point",
            event.object
        );
    }
}
