pub mod gesture_settings;
pub mod hit_test_settings;
