//! Pure geometric primitives: plain functions over `bevy::math`
//! vectors with no access to the scene. Rays are built by the scene
//! query port (which knows the camera) and handed in.

pub mod features;
pub mod ray;

pub use features::FeatureHitTestResult;
pub use ray::HitTestRay;
