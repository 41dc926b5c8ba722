//! Collision events (Host → Simulation)

use bevy::prelude::*;

use crate::components::SceneHandle;

/// Event: host traversal found two overlapping colliders
///
/// Пара неупорядоченная: dispatcher сам решает, кто actor, а кто target.
/// Host шлёт пару каждый тик, пока overlap продолжается.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub from: SceneHandle,
    pub into: SceneHandle,
}

impl CollisionPair {
    pub fn new(from: SceneHandle, into: SceneHandle) -> Self {
        Self { from, into }
    }

    /// Same pair, swapped order
    pub fn reversed(&self) -> Self {
        Self {
            from: self.into,
            into: self.from,
        }
    }
}
