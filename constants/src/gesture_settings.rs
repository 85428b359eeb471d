use std::f32::consts::PI;

/// Refresh rate for the active gesture, independent of incoming touch
/// events so camera motion alone still updates a held object.
pub const GESTURE_REFRESH_HZ: f64 = 60.0;

/// Screen-space drag distance before a single-finger touch starts
/// translating the object it landed on.
pub const SINGLE_FINGER_TRANSLATION_THRESHOLD: f32 = 30.0;

/// Two-finger translation latch distance.
pub const TWO_FINGER_TRANSLATION_THRESHOLD: f32 = 40.0;
/// Raised translation latch used once rotation or scale is already
/// active, so a rotating user does not drag the object by accident.
pub const TWO_FINGER_TRANSLATION_THRESHOLD_HARDER: f32 = 70.0;

/// Finger-pair angle delta before rotation latches (12°).
pub const ROTATION_THRESHOLD: f32 = PI / 15.0;
/// Raised rotation latch once translation or scale is already active (18°).
pub const ROTATION_THRESHOLD_HARDER: f32 = PI / 10.0;

/// Pinch distance delta before scale latches. Scale application is
/// reserved; the latch state only widens the other thresholds.
pub const SCALE_THRESHOLD: f32 = 50.0;
pub const SCALE_THRESHOLD_HARDER: f32 = 90.0;
