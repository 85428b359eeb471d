use bevy::input::touch::TouchPhase;
use bevy::prelude::*;

/// Snapshot of one platform touch: identity plus the latest screen
/// position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Vec2,
}

/// The set of currently active touches, identity-unique. Kept in
/// arrival order so "first touch" is stable across updates.
#[derive(Debug, Clone, Default)]
pub struct TouchSet {
    touches: Vec<TouchPoint>,
}

impl TouchSet {
    /// Began/moved union the touch in, ended/cancelled subtract it.
    pub fn apply(&mut self, phase: TouchPhase, touch: TouchPoint) {
        match phase {
            TouchPhase::Started | TouchPhase::Moved => self.union(touch),
            TouchPhase::Ended | TouchPhase::Canceled => self.subtract(touch.id),
        }
    }

    pub fn union(&mut self, touch: TouchPoint) {
        if let Some(existing) = self.touches.iter_mut().find(|t| t.id == touch.id) {
            existing.position = touch.position;
        } else {
            self.touches.push(touch);
        }
    }

    pub fn subtract(&mut self, id: u64) {
        self.touches.retain(|t| t.id != id);
    }

    pub fn clear(&mut self) {
        self.touches.clear();
    }

    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }

    pub fn first(&self) -> Option<TouchPoint> {
        self.touches.first().copied()
    }

    /// The two active touches, `None` unless exactly two are down.
    pub fn pair(&self) -> Option<(TouchPoint, TouchPoint)> {
        match self.touches.as_slice() {
            &[a, b] => Some((a, b)),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TouchPoint> {
        self.touches.iter()
    }
}
