//! Two-tap distance measurement. While active the tool owns touch
//! input: the first tap anchors the start point, the second completes
//! the measurement. Tap points resolve against detected planes first
//! and fall back to the sparse feature cloud.

use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use constants::hit_test_settings::{
    FEATURE_CONE_OPENING_ANGLE_DEG, FEATURE_MAX_DISTANCE, FEATURE_MIN_DISTANCE,
};
use serde::{Deserialize, Serialize};

use crate::geometry::features::{hit_test_with_features, nearest_feature_to_ray};
use crate::scene::{SceneQuery, SceneQueryProvider, hit_test_ray_from_screen_pos};

/// Distance in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub start: Vec3,
    pub end: Vec3,
    pub distance: f32,
}

impl Measurement {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            end,
            distance: (end - start).length(),
        }
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct MeasurementCompletedEvent(pub Measurement);

#[derive(Resource, Default)]
pub struct MeasureTool {
    active: bool,
    pending_start: Option<Vec3>,
    current: Option<Measurement>,
}

impl MeasureTool {
    /// Activating clears any half-finished measurement; deactivating
    /// keeps the last completed one around for display.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.pending_start = None;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current(&self) -> Option<Measurement> {
        self.current
    }

    pub fn pending_start(&self) -> Option<Vec3> {
        self.pending_start
    }

    /// Registers one resolved tap point. Returns the measurement when
    /// this point completes a start/end pair.
    pub fn place_point(&mut self, world_position: Vec3) -> Option<Measurement> {
        match self.pending_start.take() {
            None => {
                self.pending_start = Some(world_position);
                None
            }
            Some(start) => {
                let measurement = Measurement::new(start, world_position);
                self.current = Some(measurement);
                Some(measurement)
            }
        }
    }
}

/// Resolves a tap to a world position: detected plane if hit, else the
/// feature cone in front of the ray, else the feature nearest to it.
pub fn tap_world_position(scene: &dyn SceneQuery, screen_point: Vec2) -> Option<Vec3> {
    if let Some(hit) = scene.plane_hit_test(screen_point) {
        return Some(hit.position);
    }

    let ray = hit_test_ray_from_screen_pos(scene, screen_point)?;
    let features = scene.raw_feature_points();

    let cone_hits = hit_test_with_features(
        &ray,
        &features,
        FEATURE_CONE_OPENING_ANGLE_DEG,
        FEATURE_MIN_DISTANCE,
        FEATURE_MAX_DISTANCE,
        1,
    );
    if let Some(hit) = cone_hits.first() {
        return Some(hit.position);
    }

    nearest_feature_to_ray(&ray, &features).map(|hit| hit.position)
}

pub fn measure_on_tap(
    mut tool: ResMut<MeasureTool>,
    mut touch_events: EventReader<TouchInput>,
    scene: Option<Res<SceneQueryProvider>>,
    mut completions: EventWriter<MeasurementCompletedEvent>,
) {
    if !tool.is_active() {
        touch_events.clear();
        return;
    }
    let Some(scene) = scene else {
        touch_events.clear();
        return;
    };

    for event in touch_events.read() {
        if event.phase != TouchPhase::Started {
            continue;
        }
        let Some(world) = tap_world_position(scene.scene(), event.position) else {
            continue;
        };
        if let Some(measurement) = tool.place_point(world) {
            info!("measured {:.3} m", measurement.distance);
            completions.write(MeasurementCompletedEvent(measurement));
        }
    }
}

pub struct MeasureToolPlugin;

impl Plugin for MeasureToolPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MeasureTool>()
            .add_event::<TouchInput>()
            .add_event::<MeasurementCompletedEvent>()
            .add_systems(Update, measure_on_tap);
    }
}
