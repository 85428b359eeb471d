use bevy::prelude::*;
use constants::gesture_settings::SINGLE_FINGER_TRANSLATION_THRESHOLD;

use super::touch::TouchSet;
use crate::objects::{VirtualObjectId, VirtualObjectTable};
use crate::placement::{PlacementFailedEvent, TranslateOutcome, translate_object};
use crate::scene::SceneQuery;

/// Single-finger drag, with tap-to-teleport on release. The drag only
/// engages once the finger has moved
/// [`SINGLE_FINGER_TRANSLATION_THRESHOLD`] screen units from its start;
/// at that moment the offset between touch and projected object is
/// captured so the object follows the finger without jumping under it.
#[derive(Debug)]
pub struct SingleFingerGesture {
    pub initial_touch_location: Vec2,
    pub latest_touch_location: Vec2,
    pub first_touched_object: Option<VirtualObjectId>,
    pub translation_threshold_passed: bool,
    pub has_moved_object: bool,
    pub drag_offset: Vec2,
}

impl SingleFingerGesture {
    pub fn new(touches: &TouchSet, scene: &dyn SceneQuery, table: &VirtualObjectTable) -> Self {
        assert_eq!(
            touches.len(),
            1,
            "single finger gesture constructed without exactly one touch"
        );
        let touch = touches.first().expect("touch count checked above");

        // The port may report ids for objects already despawned.
        let first_touched_object = scene
            .object_hit_test(touch.position)
            .filter(|&id| table.contains(id));

        Self {
            initial_touch_location: touch.position,
            latest_touch_location: touch.position,
            first_touched_object,
            translation_threshold_passed: false,
            has_moved_object: false,
            drag_offset: Vec2::ZERO,
        }
    }

    /// One refresh tick. Runs both on touch events and on the 60 Hz
    /// timer so camera motion keeps a held object under the finger.
    pub fn update(
        &mut self,
        touches: &TouchSet,
        scene: &dyn SceneQuery,
        table: &mut VirtualObjectTable,
        last_used_object: &mut Option<VirtualObjectId>,
    ) {
        let Some(object) = self.first_touched_object else {
            return;
        };
        let Some(touch) = touches.first() else {
            return;
        };
        self.latest_touch_location = touch.position;

        if !self.translation_threshold_passed {
            let displacement = self.latest_touch_location - self.initial_touch_location;
            if displacement.length() >= SINGLE_FINGER_TRANSLATION_THRESHOLD {
                self.translation_threshold_passed = true;

                // Fix the finger-to-object offset at latch time so the
                // object does not snap to the touch point.
                if let Some(transform) = table.get(object) {
                    let object_screen = scene.project_to_screen(transform.position);
                    self.drag_offset = self.latest_touch_location - object_screen;
                }
            }
        }

        if self.translation_threshold_passed {
            let offset_pos = self.latest_touch_location - self.drag_offset;
            let _ = translate_object(scene, table, object, offset_pos, false, true);
            self.has_moved_object = true;
            *last_used_object = Some(object);
        }
    }

    /// A plain tap (no drag, empty space, with a previously used object
    /// around) teleports that object to the tap point using plane-anchor
    /// hits only.
    pub fn finish(
        &mut self,
        touches: &TouchSet,
        scene: &dyn SceneQuery,
        table: &mut VirtualObjectTable,
        last_used_object: &Option<VirtualObjectId>,
    ) -> Option<PlacementFailedEvent> {
        // Superseded by a second finger: not a tap.
        if touches.len() > 1 {
            return None;
        }
        // Dragging already repositioned the object.
        if self.has_moved_object {
            return None;
        }

        let object = (*last_used_object)?;

        // A tap on the object itself is interaction, not repositioning.
        if scene.object_hit_test(self.latest_touch_location).is_some() {
            return None;
        }

        if self.translation_threshold_passed {
            return None;
        }

        match translate_object(
            scene,
            table,
            object,
            self.latest_touch_location,
            true,
            false,
        ) {
            TranslateOutcome::Failed => Some(PlacementFailedEvent { object }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::input::touch::TouchPhase;
    use crate::gestures::touch::TouchPoint;
    use crate::objects::VirtualObjectTransform;
    use crate::scene::fixture::FixtureScene;

    fn one_touch(position: Vec2) -> TouchSet {
        let mut set = TouchSet::default();
        set.apply(TouchPhase::Started, TouchPoint { id: 1, position });
        set
    }

    fn scene_with_object(table: &mut VirtualObjectTable) -> (FixtureScene, VirtualObjectId) {
        let id = table.spawn(VirtualObjectTransform {
            position: Vec3::new(0.5, 0.0, 0.5),
            ..Default::default()
        });
        // Projects to screen (50, 50).
        (
            FixtureScene::with_object_at(id, Vec2::new(50.0, 50.0), 20.0),
            id,
        )
    }

    #[test]
    fn below_threshold_never_writes_a_position() {
        let mut table = VirtualObjectTable::default();
        let (scene, id) = scene_with_object(&mut table);
        let mut touches = one_touch(Vec2::new(50.0, 50.0));
        let mut gesture = SingleFingerGesture::new(&touches, &scene, &table);
        let mut last_used = None;

        assert_eq!(gesture.first_touched_object, Some(id));

        touches.union(TouchPoint {
            id: 1,
            position: Vec2::new(50.0 + 29.9, 50.0),
        });
        gesture.update(&touches, &scene, &mut table, &mut last_used);

        assert!(!gesture.translation_threshold_passed);
        assert_eq!(table.get(id).unwrap().position, Vec3::new(0.5, 0.0, 0.5));
        assert_eq!(last_used, None);
    }

    #[test]
    fn latch_captures_drag_offset_without_a_jump() {
        let mut table = VirtualObjectTable::default();
        let (scene, id) = scene_with_object(&mut table);
        let mut touches = one_touch(Vec2::new(50.0, 50.0));
        let mut gesture = SingleFingerGesture::new(&touches, &scene, &table);
        let mut last_used = None;

        // 130 units of displacement: well past the latch.
        touches.union(TouchPoint {
            id: 1,
            position: Vec2::new(180.0, 50.0),
        });
        gesture.update(&touches, &scene, &mut table, &mut last_used);

        assert!(gesture.translation_threshold_passed);
        assert_eq!(gesture.drag_offset, Vec2::new(130.0, 0.0));
        // Offset position resolves back to where the object already is.
        let position = table.get(id).unwrap().position;
        assert!((position - Vec3::new(0.5, 0.0, 0.5)).length() < 1e-4);
        assert_eq!(last_used, Some(id));

        // Re-latching is idempotent: the offset does not drift.
        let offset_before = gesture.drag_offset;
        gesture.update(&touches, &scene, &mut table, &mut last_used);
        assert_eq!(gesture.drag_offset, offset_before);

        // Further movement now drags the object.
        touches.union(TouchPoint {
            id: 1,
            position: Vec2::new(190.0, 50.0),
        });
        gesture.update(&touches, &scene, &mut table, &mut last_used);
        let position = table.get(id).unwrap().position;
        assert!((position - Vec3::new(0.6, 0.0, 0.5)).length() < 1e-4);
    }

    #[test]
    fn no_candidate_means_every_tick_is_a_noop() {
        let mut table = VirtualObjectTable::default();
        let (scene, id) = scene_with_object(&mut table);
        // Touch far away from the object's screen rect.
        let mut touches = one_touch(Vec2::new(300.0, 300.0));
        let mut gesture = SingleFingerGesture::new(&touches, &scene, &table);
        let mut last_used = None;

        assert_eq!(gesture.first_touched_object, None);

        touches.union(TouchPoint {
            id: 1,
            position: Vec2::new(500.0, 500.0),
        });
        gesture.update(&touches, &scene, &mut table, &mut last_used);

        assert!(!gesture.translation_threshold_passed);
        assert_eq!(table.get(id).unwrap().position, Vec3::new(0.5, 0.0, 0.5));
    }

    #[test]
    fn hit_on_a_despawned_object_is_not_a_candidate() {
        let mut table = VirtualObjectTable::default();
        let (scene, id) = scene_with_object(&mut table);
        table.remove(id);

        // The port still reports the id for the touch point.
        assert_eq!(scene.object_hit_test(Vec2::new(50.0, 50.0)), Some(id));

        let touches = one_touch(Vec2::new(50.0, 50.0));
        let gesture = SingleFingerGesture::new(&touches, &scene, &table);
        assert_eq!(gesture.first_touched_object, None);
    }
}
