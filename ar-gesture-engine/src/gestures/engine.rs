use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use constants::gesture_settings::GESTURE_REFRESH_HZ;

use super::single_finger::SingleFingerGesture;
use super::touch::{TouchPoint, TouchSet};
use super::two_finger::TwoFingerGesture;
use crate::objects::{VirtualObjectId, VirtualObjectTable};
use crate::placement::{PlacementFailedEvent, log_placement_failures};
use crate::scene::{SceneQuery, SceneQueryProvider};
use crate::tools::measure::MeasureTool;

/// The gesture currently in progress, at most one at a time.
#[derive(Debug)]
pub enum Gesture {
    Single(SingleFingerGesture),
    Two(TwoFingerGesture),
}

impl Gesture {
    /// Classifies the full set of active touches into a gesture. Three
    /// or more fingers are deliberately ignored.
    pub fn start_from_touches(
        touches: &TouchSet,
        scene: &dyn SceneQuery,
        table: &VirtualObjectTable,
    ) -> Option<Gesture> {
        match touches.len() {
            1 => Some(Gesture::Single(SingleFingerGesture::new(
                touches, scene, table,
            ))),
            2 => Some(Gesture::Two(TwoFingerGesture::new(touches, scene, table))),
            _ => None,
        }
    }
}

/// Central gesture state: the live touch set, the gesture in progress,
/// and the object most recently moved by any gesture (the target for
/// tap-to-teleport).
#[derive(Resource, Default)]
pub struct GestureEngine {
    touches: TouchSet,
    current: Option<Gesture>,
    last_used_object: Option<VirtualObjectId>,
}

impl GestureEngine {
    /// Feeds one platform touch event through the state machine. A
    /// finished single-finger gesture is immediately replaced by
    /// whatever the new touch set classifies as, so a second finger
    /// mid-drag hands over without an idle gap; a two-finger gesture
    /// always ends on any count change.
    pub fn handle_touch_event(
        &mut self,
        phase: TouchPhase,
        touch: TouchPoint,
        scene: &dyn SceneQuery,
        table: &mut VirtualObjectTable,
    ) -> Option<PlacementFailedEvent> {
        self.touches.apply(phase, touch);

        match self.current.take() {
            None => {
                if phase == TouchPhase::Started {
                    self.current = Gesture::start_from_touches(&self.touches, scene, table);
                }
                None
            }
            Some(Gesture::Single(mut gesture)) => {
                if self.touches.len() == 1 {
                    gesture.update(
                        &self.touches,
                        scene,
                        table,
                        &mut self.last_used_object,
                    );
                    self.current = Some(Gesture::Single(gesture));
                    None
                } else {
                    let failure =
                        gesture.finish(&self.touches, scene, table, &self.last_used_object);
                    self.current = Gesture::start_from_touches(&self.touches, scene, table);
                    failure
                }
            }
            Some(Gesture::Two(mut gesture)) => {
                if self.touches.len() == 2 {
                    gesture.update(
                        &self.touches,
                        scene,
                        table,
                        &mut self.last_used_object,
                    );
                    self.current = Some(Gesture::Two(gesture));
                } else {
                    gesture.finish();
                }
                None
            }
        }
    }

    /// One timer tick: keeps a held object under the finger while the
    /// camera moves between touch events.
    pub fn advance(&mut self, scene: &dyn SceneQuery, table: &mut VirtualObjectTable) {
        match &mut self.current {
            None => {}
            Some(Gesture::Single(gesture)) => {
                gesture.update(&self.touches, scene, table, &mut self.last_used_object);
            }
            Some(Gesture::Two(gesture)) => {
                gesture.update(&self.touches, scene, table, &mut self.last_used_object);
            }
        }
    }

    /// Marks an object as the teleport target, as if a gesture had just
    /// moved it. Hosts call this right after placing a new object.
    pub fn note_object_used(&mut self, object: VirtualObjectId) {
        self.last_used_object = Some(object);
    }

    pub fn last_used_object(&self) -> Option<VirtualObjectId> {
        self.last_used_object
    }

    /// Drops all gesture state, e.g. when an exclusive tool takes over
    /// touch input.
    pub fn reset(&mut self) {
        self.touches.clear();
        self.current = None;
    }
}

/// Drains platform touch events into the engine. Suspended while the
/// measure tool owns touch input.
pub fn handle_touch_input(
    mut engine: ResMut<GestureEngine>,
    mut touch_events: EventReader<TouchInput>,
    scene: Option<Res<SceneQueryProvider>>,
    mut table: ResMut<VirtualObjectTable>,
    mut failures: EventWriter<PlacementFailedEvent>,
    measure: Option<Res<MeasureTool>>,
) {
    let Some(scene) = scene else {
        touch_events.clear();
        return;
    };

    if measure.as_ref().is_some_and(|tool| tool.is_active()) {
        engine.reset();
        touch_events.clear();
        return;
    }

    for event in touch_events.read() {
        let touch = TouchPoint {
            id: event.id,
            position: event.position,
        };
        if let Some(failure) =
            engine.handle_touch_event(event.phase, touch, scene.scene(), &mut table)
        {
            failures.write(failure);
        }
    }
}

/// Fixed-rate refresh of the active gesture.
pub fn refresh_active_gesture(
    mut engine: ResMut<GestureEngine>,
    scene: Option<Res<SceneQueryProvider>>,
    mut table: ResMut<VirtualObjectTable>,
) {
    let Some(scene) = scene else {
        return;
    };
    engine.advance(scene.scene(), &mut table);
}

pub struct GestureEnginePlugin;

impl Plugin for GestureEnginePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GestureEngine>()
            .init_resource::<VirtualObjectTable>()
            .add_event::<TouchInput>()
            .add_event::<PlacementFailedEvent>()
            .insert_resource(Time::<Fixed>::from_hz(GESTURE_REFRESH_HZ))
            .add_systems(
                Update,
                (handle_touch_input, log_placement_failures).chain(),
            )
            .add_systems(FixedUpdate, refresh_active_gesture);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::{Vec2, Vec3};
    use crate::objects::VirtualObjectTransform;
    use crate::scene::{PlaneAnchorId, PlaneHit};
    use crate::scene::fixture::FixtureScene;

    fn touch(id: u64, x: f32, y: f32) -> TouchPoint {
        TouchPoint {
            id,
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn drag_moves_the_object_and_records_it_as_last_used() {
        let mut table = VirtualObjectTable::default();
        let id = table.spawn(VirtualObjectTransform {
            position: Vec3::new(0.5, 0.0, 0.5),
            ..Default::default()
        });
        let scene = FixtureScene::with_object_at(id, Vec2::new(50.0, 50.0), 20.0);
        let mut engine = GestureEngine::default();

        engine.handle_touch_event(TouchPhase::Started, touch(1, 50.0, 50.0), &scene, &mut table);
        engine.handle_touch_event(TouchPhase::Moved, touch(1, 180.0, 50.0), &scene, &mut table);
        engine.handle_touch_event(TouchPhase::Moved, touch(1, 190.0, 50.0), &scene, &mut table);

        let position = table.get(id).unwrap().position;
        assert!((position - Vec3::new(0.6, 0.0, 0.5)).length() < 1e-4);
        assert_eq!(engine.last_used_object(), Some(id));

        let failure =
            engine.handle_touch_event(TouchPhase::Ended, touch(1, 190.0, 50.0), &scene, &mut table);
        assert!(failure.is_none());
        assert!(engine.current.is_none());
    }

    #[test]
    fn tap_on_a_plane_teleports_the_last_used_object() {
        let mut table = VirtualObjectTable::default();
        let id = table.spawn(VirtualObjectTransform::default());
        let scene = FixtureScene {
            plane_hit: Some(PlaneHit {
                position: Vec3::new(3.0, 0.0, 3.0),
                anchor: PlaneAnchorId(7),
            }),
            ..Default::default()
        };
        let mut engine = GestureEngine::default();
        engine.note_object_used(id);

        engine.handle_touch_event(TouchPhase::Started, touch(1, 300.0, 300.0), &scene, &mut table);
        let failure =
            engine.handle_touch_event(TouchPhase::Ended, touch(1, 300.0, 300.0), &scene, &mut table);

        assert!(failure.is_none());
        assert_eq!(table.get(id).unwrap().position, Vec3::new(3.0, 0.0, 3.0));
    }

    #[test]
    fn tap_without_a_plane_reports_a_placement_failure() {
        let mut table = VirtualObjectTable::default();
        let id = table.spawn(VirtualObjectTransform::default());
        let scene = FixtureScene::default();
        let mut engine = GestureEngine::default();
        engine.note_object_used(id);

        engine.handle_touch_event(TouchPhase::Started, touch(1, 300.0, 300.0), &scene, &mut table);
        let failure =
            engine.handle_touch_event(TouchPhase::Ended, touch(1, 300.0, 300.0), &scene, &mut table);

        assert_eq!(failure.map(|f| f.object), Some(id));
        assert_eq!(table.get(id).unwrap().position, Vec3::ZERO);
    }

    #[test]
    fn second_finger_hands_over_to_the_two_finger_gesture() {
        let mut table = VirtualObjectTable::default();
        let id = table.spawn(VirtualObjectTransform {
            position: Vec3::new(0.5, 0.0, 0.5),
            ..Default::default()
        });
        let scene = FixtureScene::with_object_at(id, Vec2::new(50.0, 50.0), 20.0);
        let mut engine = GestureEngine::default();
        engine.note_object_used(id);

        engine.handle_touch_event(TouchPhase::Started, touch(1, 50.0, 50.0), &scene, &mut table);
        assert!(matches!(engine.current, Some(Gesture::Single(_))));

        // The handover must not be mistaken for a tap: no teleport, no
        // failure, and the two-finger gesture is live immediately.
        let failure =
            engine.handle_touch_event(TouchPhase::Started, touch(2, 60.0, 50.0), &scene, &mut table);
        assert!(failure.is_none());
        assert!(matches!(engine.current, Some(Gesture::Two(_))));
        assert_eq!(table.get(id).unwrap().position, Vec3::new(0.5, 0.0, 0.5));

        // Lifting either finger ends the two-finger gesture outright.
        engine.handle_touch_event(TouchPhase::Ended, touch(2, 60.0, 50.0), &scene, &mut table);
        assert!(engine.current.is_none());
    }

    #[test]
    fn advance_without_a_gesture_is_a_noop() {
        let mut table = VirtualObjectTable::default();
        let scene = FixtureScene::default();
        let mut engine = GestureEngine::default();
        engine.advance(&scene, &mut table);
        assert!(engine.current.is_none());
    }

    #[test]
    fn three_fingers_start_nothing() {
        let mut table = VirtualObjectTable::default();
        let scene = FixtureScene::default();
        let mut engine = GestureEngine::default();

        engine.handle_touch_event(TouchPhase::Started, touch(1, 10.0, 10.0), &scene, &mut table);
        engine.handle_touch_event(TouchPhase::Started, touch(2, 20.0, 10.0), &scene, &mut table);
        engine.handle_touch_event(TouchPhase::Started, touch(3, 30.0, 10.0), &scene, &mut table);
        assert!(engine.current.is_none());

        // Back down to two does not resurrect a gesture mid-flight.
        engine.handle_touch_event(TouchPhase::Ended, touch(3, 30.0, 10.0), &scene, &mut table);
        assert!(engine.current.is_none());
    }
}
