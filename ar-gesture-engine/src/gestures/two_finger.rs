use bevy::prelude::*;
use constants::gesture_settings::{
    ROTATION_THRESHOLD, ROTATION_THRESHOLD_HARDER, TWO_FINGER_TRANSLATION_THRESHOLD,
    TWO_FINGER_TRANSLATION_THRESHOLD_HARDER,
};

use super::touch::{TouchPoint, TouchSet};
use crate::objects::{VirtualObjectId, VirtualObjectTable};
use crate::placement::translate_object;
use crate::scene::SceneQuery;

fn midpoint(a: Vec2, b: Vec2) -> Vec2 {
    (a + b) / 2.0
}

/// Combined two-finger translate/rotate. Candidate selection samples a
/// lattice of thirteen points spanned by the two touches so the user
/// can grab an object without either finger landing exactly on it.
/// Translation and rotation each latch behind their own threshold;
/// once one axis is active the other axis' threshold widens. Scale
/// state is recorded for the same coupling but no scale is applied.
#[derive(Debug)]
pub struct TwoFingerGesture {
    pub first_touch: TouchPoint,
    pub second_touch: TouchPoint,

    pub translation_threshold_passed: bool,
    pub allow_translation: bool,
    pub drag_offset: Vec2,
    pub initial_mid_point: Vec2,

    pub rotation_threshold_passed: bool,
    pub allow_rotation: bool,
    pub initial_finger_angle: f32,
    pub initial_object_angle: f32,
    pub first_touched_object: Option<VirtualObjectId>,

    pub scale_threshold_passed: bool,
    pub initial_distance_between_fingers: f32,
    pub object_base_scale: f32,
}

impl TwoFingerGesture {
    pub fn new(touches: &TouchSet, scene: &dyn SceneQuery, table: &VirtualObjectTable) -> Self {
        let (first_touch, second_touch) = touches
            .pair()
            .expect("two finger gesture constructed without exactly two touches");

        let first_point = first_touch.position;
        let second_point = second_touch.position;
        let initial_mid_point = midpoint(first_point, second_point);

        // The two other corners of the rectangle the fingers span.
        let third_corner = Vec2::new(first_point.x, second_point.y);
        let fourth_corner = Vec2::new(second_point.x, first_point.y);

        // Corners, centre, and all midpoints in between: a generous hit
        // area so the object need not sit exactly under a fingertip.
        let sample_points = [
            first_point,
            second_point,
            third_corner,
            fourth_corner,
            initial_mid_point,
            midpoint(third_corner, first_point),
            midpoint(third_corner, second_point),
            midpoint(fourth_corner, first_point),
            midpoint(fourth_corner, second_point),
            midpoint(initial_mid_point, first_point),
            midpoint(initial_mid_point, second_point),
            midpoint(initial_mid_point, third_corner),
            midpoint(initial_mid_point, fourth_corner),
        ];

        let first_touched_object = sample_points
            .iter()
            .find_map(|&point| scene.object_hit_test(point))
            .filter(|&id| table.contains(id));

        let mut gesture = Self {
            first_touch,
            second_touch,
            translation_threshold_passed: false,
            allow_translation: false,
            drag_offset: Vec2::ZERO,
            initial_mid_point,
            rotation_threshold_passed: false,
            allow_rotation: false,
            initial_finger_angle: 0.0,
            initial_object_angle: 0.0,
            first_touched_object,
            scale_threshold_passed: false,
            initial_distance_between_fingers: 0.0,
            object_base_scale: 1.0,
        };

        if let Some(transform) = first_touched_object.and_then(|id| table.get(id)) {
            gesture.object_base_scale = transform.scale;
            gesture.allow_translation = true;
            gesture.allow_rotation = true;
            gesture.initial_distance_between_fingers = (first_point - second_point).length();
            gesture.initial_finger_angle = initial_mid_point.x.atan2(initial_mid_point.y);
            gesture.initial_object_angle = transform.yaw;
        }

        gesture
    }

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
        let Some((a, b)) = touches.pair() else {
            return;
        };

        // Re-pair by identity, not position, so the fingers never swap roles.
        if a.id == self.first_touch.id {
            self.first_touch = a;
            self.second_touch = b;
        } else {
            self.first_touch = b;
            self.second_touch = a;
        }

        let loc1 = self.first_touch.position;
        let loc2 = self.second_touch.position;

        if self.allow_translation {
            self.update_translation(scene, table, object, midpoint(loc1, loc2), last_used_object);
        }

        if self.allow_rotation {
            self.update_rotation(table, object, loc1 - loc2, last_used_object);
        }
    }

    fn update_translation(
        &mut self,
        scene: &dyn SceneQuery,
        table: &mut VirtualObjectTable,
        object: VirtualObjectId,
        mid: Vec2,
        last_used_object: &mut Option<VirtualObjectId>,
    ) {
        if !self.translation_threshold_passed {
            let distance_from_start = (mid - self.initial_mid_point).length();

            // A user who is already rotating or scaling has to move
            // further before we also start translating.
            let threshold = if self.rotation_threshold_passed || self.scale_threshold_passed {
                TWO_FINGER_TRANSLATION_THRESHOLD_HARDER
            } else {
                TWO_FINGER_TRANSLATION_THRESHOLD
            };

            if distance_from_start >= threshold {
                self.translation_threshold_passed = true;

                if let Some(transform) = table.get(object) {
                    let object_screen = scene.project_to_screen(transform.position);
                    self.drag_offset = mid - object_screen;
                }
            }
        }

        if self.translation_threshold_passed {
            let offset_pos = mid - self.drag_offset;
            let _ = translate_object(scene, table, object, offset_pos, false, true);
            *last_used_object = Some(object);
        }
    }

    fn update_rotation(
        &mut self,
        table: &mut VirtualObjectTable,
        object: VirtualObjectId,
        span: Vec2,
        last_used_object: &mut Option<VirtualObjectId>,
    ) {
        let midpoint_to_first_touch = span / 2.0;
        let current_angle = midpoint_to_first_touch.x.atan2(midpoint_to_first_touch.y);
        let angle_delta = self.initial_finger_angle - current_angle;

        if !self.rotation_threshold_passed {
            let threshold = if self.translation_threshold_passed || self.scale_threshold_passed {
                ROTATION_THRESHOLD_HARDER
            } else {
                ROTATION_THRESHOLD
            };

            if angle_delta.abs() > threshold {
                self.rotation_threshold_passed = true;

                // Absorb the threshold into the baseline so the object
                // does not snap by the whole delta on activation.
                if angle_delta > 0.0 {
                    self.initial_object_angle += threshold;
                } else {
                    self.initial_object_angle -= threshold;
                }
            }
        }

        if self.rotation_threshold_passed {
            // Subtracting the delta matches looking down on the object,
            // which covers virtually all placement use.
            if let Some(transform) = table.get_mut(object) {
                transform.yaw = self.initial_object_angle - angle_delta;
                *last_used_object = Some(object);
            }
        }
    }

    /// Two-finger release always drops straight to no gesture.
    pub fn finish(&mut self) {}
}
