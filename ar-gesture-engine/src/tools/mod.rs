//! Auxiliary interaction tools layered on the same scene queries as the
//! gesture engine. The measure tool is exclusive: while it is active the
//! gesture engine drops its state and ignores touch input.

pub mod draw;
pub mod measure;

pub use draw::{DrawTrail, DrawTrailPlugin, FingertipSampleEvent};
pub use measure::{Measurement, MeasurementCompletedEvent, MeasureTool, MeasureToolPlugin};
