//! Multi-touch gesture classification and the transform engine.
//!
//! ## Architecture
//!
//! Platform touch events flow into a [`GestureEngine`] resource holding
//! the live [`TouchSet`] and at most one gesture in progress:
//!
//! ```text
//!            touch began (1 down)           touch began (2 down)
//!   (none) ────────────────────▶ Single ─────────────────────▶ Two
//!      ▲                           │                            │
//!      │     touch ended           │      any count change      │
//!      └───────────────────────────┴────────────────────────────┘
//! ```
//!
//! [`SingleFingerGesture`] drags one object and teleports the last used
//! object on a plain tap. [`TwoFingerGesture`] combines translation and
//! rotation behind independent latch thresholds. Both re-resolve the
//! held object's surface position on a fixed 60 Hz tick so it stays
//! under the finger while the camera moves.
//!
//! All scene access goes through the [`SceneQuery`](crate::scene::SceneQuery)
//! port; nothing in here knows about the renderer.

pub mod engine;
pub mod single_finger;
pub mod touch;
pub mod two_finger;

pub use engine::{Gesture, GestureEngine, GestureEnginePlugin};
pub use single_finger::SingleFingerGesture;
pub use touch::{TouchPoint, TouchSet};
pub use two_finger::TwoFingerGesture;
