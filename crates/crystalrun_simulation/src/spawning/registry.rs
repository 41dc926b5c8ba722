//! Entity registries — per-category live collections + reverse index
//!
//! # Architecture
//! - `Registry<T>` хранит entries в порядке вставки (детерминированный обход)
//! - `Registries` владеет всеми категориями и одним `SceneHandle → EntityRef`
//!   индексом (arena + index вместо тегов на host-объектах)
//! - Удаление: сначала чистим индекс, потом `Despawn` для host.
//!   Collision с уже освобождённым handle резолвится в `None`.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::components::{
    Barrier, Crystal, EntityId, EntityKind, HandleAllocator, Obstacle, PowerUp, SceneHandle,
};
use crate::scene::{SceneCommand, VisualKind};

/// Logical address of a registry entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub id: EntityId,
    pub handle: SceneHandle,
    pub data: T,
}

/// Insertion-ordered collection of one entity category
#[derive(Debug, Clone)]
pub struct Registry<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> Registry<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entry<T>> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entry<T>> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entry<T>> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    fn push(&mut self, entry: Entry<T>) {
        self.entries.push(entry);
    }

    /// Order-preserving removal
    fn take(&mut self, id: EntityId) -> Option<Entry<T>> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }
}

/// Entity type stored in one of the registries
pub trait Tracked: Sized {
    const KIND: EntityKind;

    fn registry(registries: &Registries) -> &Registry<Self>;
    fn registry_mut(registries: &mut Registries) -> &mut Registry<Self>;
    fn position(&self) -> Vec3;
    fn visual(&self) -> VisualKind;
}

impl Tracked for Crystal {
    const KIND: EntityKind = EntityKind::Crystal;

    fn registry(registries: &Registries) -> &Registry<Self> {
        &registries.crystals
    }
    fn registry_mut(registries: &mut Registries) -> &mut Registry<Self> {
        &mut registries.crystals
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn visual(&self) -> VisualKind {
        VisualKind::Crystal
    }
}

impl Tracked for Barrier {
    const KIND: EntityKind = EntityKind::Barrier;

    fn registry(registries: &Registries) -> &Registry<Self> {
        &registries.barriers
    }
    fn registry_mut(registries: &mut Registries) -> &mut Registry<Self> {
        &mut registries.barriers
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn visual(&self) -> VisualKind {
        VisualKind::Barrier
    }
}

impl Tracked for PowerUp {
    const KIND: EntityKind = EntityKind::PowerUp;

    fn registry(registries: &Registries) -> &Registry<Self> {
        &registries.power_ups
    }
    fn registry_mut(registries: &mut Registries) -> &mut Registry<Self> {
        &mut registries.power_ups
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn visual(&self) -> VisualKind {
        VisualKind::PowerUp {
            ammo_bonus: self.ammo_bonus,
        }
    }
}

impl Tracked for Obstacle {
    const KIND: EntityKind = EntityKind::Obstacle;

    fn registry(registries: &Registries) -> &Registry<Self> {
        &registries.obstacles
    }
    fn registry_mut(registries: &mut Registries) -> &mut Registry<Self> {
        &mut registries.obstacles
    }
    fn position(&self) -> Vec3 {
        self.position
    }
    fn visual(&self) -> VisualKind {
        VisualKind::Obstacle(self.shape)
    }
}

/// All live corridor entities
#[derive(Debug, Clone, Default)]
pub struct Registries {
    pub crystals: Registry<Crystal>,
    pub barriers: Registry<Barrier>,
    pub power_ups: Registry<PowerUp>,
    pub obstacles: Registry<Obstacle>,
    index: HashMap<SceneHandle, EntityRef>,
    next_id: u64,
}

impl Registries {
    /// Register a new entity and ask the host for its visual + collider
    pub fn insert<T: Tracked>(
        &mut self,
        data: T,
        handles: &mut HandleAllocator,
        scene: &mut Vec<SceneCommand>,
    ) -> EntityRef {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let handle = handles.allocate();
        let entity = EntityRef { kind: T::KIND, id };

        scene.push(SceneCommand::Spawn {
            handle,
            kind: data.visual(),
            position: data.position(),
        });
        self.index.insert(handle, entity);
        T::registry_mut(self).push(Entry { id, handle, data });

        entity
    }

    /// Remove an entity: reverse index first, then release the handle
    pub fn remove<T: Tracked>(
        &mut self,
        id: EntityId,
        scene: &mut Vec<SceneCommand>,
    ) -> Option<Entry<T>> {
        let entry = T::registry_mut(self).take(id)?;
        self.index.remove(&entry.handle);
        scene.push(SceneCommand::Despawn {
            handle: entry.handle,
        });
        Some(entry)
    }

    /// Remove every entity more than `distance` behind `camera_y`
    ///
    /// `on_remove` видит entry до удаления (barrier miss penalty).
    /// Returns number of removed entries.
    pub fn remove_behind<T: Tracked>(
        &mut self,
        camera_y: f32,
        distance: f32,
        scene: &mut Vec<SceneCommand>,
        mut on_remove: impl FnMut(&Entry<T>),
    ) -> usize {
        let cutoff = camera_y - distance;
        let expired: Vec<EntityId> = T::registry(self)
            .iter()
            .filter(|e| e.data.position().y < cutoff)
            .map(|e| e.id)
            .collect();

        for id in &expired {
            if let Some(entry) = T::registry(self).get(*id) {
                on_remove(entry);
            }
            self.remove::<T>(*id, scene);
        }

        expired.len()
    }

    /// Handle → logical entity (None for stale/unknown handles)
    pub fn resolve(&self, handle: SceneHandle) -> Option<EntityRef> {
        self.index.get(&handle).copied()
    }

    pub fn get<T: Tracked>(&self, id: EntityId) -> Option<&Entry<T>> {
        T::registry(self).get(id)
    }

    pub fn get_mut<T: Tracked>(&mut self, id: EntityId) -> Option<&mut Entry<T>> {
        T::registry_mut(self).get_mut(id)
    }

    /// Number of handles currently mapped (== total live entities)
    pub fn indexed(&self) -> usize {
        self.index.len()
    }

    pub fn total(&self) -> usize {
        self.crystals.len() + self.barriers.len() + self.power_ups.len() + self.obstacles.len()
    }

    /// Drop everything (game restart). Every handle is released.
    pub fn clear(&mut self, scene: &mut Vec<SceneCommand>) {
        fn drain<T>(registry: &mut Registry<T>, scene: &mut Vec<SceneCommand>) {
            for entry in registry.entries.drain(..) {
                scene.push(SceneCommand::Despawn {
                    handle: entry.handle,
                });
            }
        }

        self.index.clear();
        drain(&mut self.crystals, scene);
        drain(&mut self.barriers, scene);
        drain(&mut self.power_ups, scene);
        drain(&mut self.obstacles, scene);
    }
}
