//! Table of placed virtual objects. The gesture core holds plain ids
//! into it and mutates position/yaw/scale through it; spawning and
//! despawning is the host application's business.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VirtualObjectId(pub u64);

/// Rotation is yaw-only: objects spin around the world up axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VirtualObjectTransform {
    pub position: Vec3,
    pub yaw: f32,
    pub scale: f32,
}

impl Default for VirtualObjectTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            scale: 1.0,
        }
    }
}

#[derive(Resource, Default)]
pub struct VirtualObjectTable {
    objects: HashMap<VirtualObjectId, VirtualObjectTransform>,
    next_id: u64,
}

impl VirtualObjectTable {
    pub fn spawn(&mut self, transform: VirtualObjectTransform) -> VirtualObjectId {
        let id = VirtualObjectId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, transform);
        id
    }

    pub fn remove(&mut self, id: VirtualObjectId) -> Option<VirtualObjectTransform> {
        self.objects.remove(&id)
    }

    pub fn get(&self, id: VirtualObjectId) -> Option<&VirtualObjectTransform> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: VirtualObjectId) -> Option<&mut VirtualObjectTransform> {
        self.objects.get_mut(&id)
    }

    pub fn contains(&self, id: VirtualObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VirtualObjectId, &VirtualObjectTransform)> {
        self.objects.iter().map(|(&id, transform)| (id, transform))
    }
}
