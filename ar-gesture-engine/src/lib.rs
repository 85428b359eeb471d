//! Gesture-driven placement and manipulation of virtual objects on
//! detected real-world surfaces.
//!
//! The engine turns raw multi-touch input into transform edits on a
//! table of placed objects: single-finger drag, tap-to-teleport,
//! combined two-finger translate/rotate, plus a two-tap measure tool
//! and a fingertip drawing trail. It owns no rendering or tracking of
//! its own; the host supplies both through the
//! [`SceneQuery`](scene::SceneQuery) port.
//!
//! Add [`ArGestureEnginePlugin`] and install a
//! [`SceneQueryProvider`](scene::SceneQueryProvider) resource; feed
//! platform touches as [`TouchInput`](bevy::input::touch::TouchInput)
//! events.

pub mod geometry;
pub mod gestures;
pub mod objects;
pub mod placement;
pub mod scene;
pub mod tools;

use bevy::prelude::*;

pub use gestures::{GestureEngine, GestureEnginePlugin};
pub use objects::{VirtualObjectId, VirtualObjectTable, VirtualObjectTransform};
pub use placement::PlacementFailedEvent;
pub use scene::{SceneQuery, SceneQueryProvider};
pub use tools::{DrawTrailPlugin, MeasureToolPlugin};

/// Everything at once: gesture engine, measure tool, draw trail.
pub struct ArGestureEnginePlugin;

impl Plugin for ArGestureEnginePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((GestureEnginePlugin, MeasureToolPlugin, DrawTrailPlugin));
    }
}
