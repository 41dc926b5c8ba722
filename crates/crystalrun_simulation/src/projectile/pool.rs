//! Projectile pool — fixed set of reusable slots
//!
//! # Architecture
//! - N slots создаются один раз при старте, никогда не удаляются
//! - `spawn` берёт первый inactive slot (порядок создания, не random)
//! - Pool full → выстрел молча теряется (soft limit на fire rate)
//! - Visual show/hide зеркалит `active` (через SceneCommand outbox)

use bevy::prelude::*;

use crate::components::{HandleAllocator, SceneHandle};
use crate::config::ProjectileConfig;
use crate::scene::SceneCommand;

/// One pool slot
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub slot: usize,
    pub handle: SceneHandle,
    pub active: bool,
    pub position: Vec3,
    /// Unit vector
    pub direction: Vec3,
    pub speed: f32,
    /// Gameplay clock value at launch
    pub spawn_time: f32,
    pub lifetime: f32,
}

impl Projectile {
    fn new(slot: usize, handle: SceneHandle, speed: f32, lifetime: f32) -> Self {
        Self {
            slot,
            handle,
            active: false,
            position: Vec3::ZERO,
            direction: Vec3::Y,
            speed,
            spawn_time: 0.0,
            lifetime,
        }
    }

    pub fn is_expired(&self, now: f32) -> bool {
        now - self.spawn_time > self.lifetime
    }
}

#[derive(Resource, Debug, Clone)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn new(config: &ProjectileConfig, handles: &mut HandleAllocator) -> Self {
        let slots = (0..config.pool_size)
            .map(|slot| Projectile::new(slot, handles.allocate(), config.speed, config.lifetime))
            .collect();
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|p| p.active).count()
    }

    pub fn slots(&self) -> &[Projectile] {
        &self.slots
    }

    pub fn get(&self, slot: usize) -> Option<&Projectile> {
        self.slots.get(slot)
    }

    pub fn iter_active(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter().filter(|p| p.active)
    }

    /// Reverse lookup: collider handle → slot index
    pub fn slot_for(&self, handle: SceneHandle) -> Option<usize> {
        self.slots.iter().position(|p| p.handle == handle)
    }

    /// Launch from the first free slot
    ///
    /// Returns false (state untouched) when every slot is in flight.
    /// Нулевое направление заменяется на +Y (camera forward).
    pub fn spawn(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        now: f32,
        scene: &mut Vec<SceneCommand>,
    ) -> bool {
        let Some(projectile) = self.slots.iter_mut().find(|p| !p.active) else {
            return false;
        };

        projectile.position = origin;
        projectile.direction = direction.try_normalize().unwrap_or(Vec3::Y);
        projectile.spawn_time = now;
        projectile.active = true;

        scene.push(SceneCommand::ShowProjectile {
            handle: projectile.handle,
            position: origin,
        });

        true
    }

    /// Advance active slots and recycle expired ones
    ///
    /// Returns number of slots expired this call.
    pub fn update(&mut self, dt: f32, now: f32, scene: &mut Vec<SceneCommand>) -> usize {
        let mut expired = 0;

        for projectile in self.slots.iter_mut().filter(|p| p.active) {
            projectile.position += projectile.direction * projectile.speed * dt;

            if projectile.is_expired(now) {
                projectile.active = false;
                scene.push(SceneCommand::HideProjectile {
                    handle: projectile.handle,
                });
                expired += 1;
            }
        }

        expired
    }

    /// Idempotent: returns true only on an active → inactive transition
    pub fn deactivate(&mut self, slot: usize, scene: &mut Vec<SceneCommand>) -> bool {
        let Some(projectile) = self.slots.get_mut(slot) else {
            return false;
        };
        if !projectile.active {
            return false;
        }

        projectile.active = false;
        scene.push(SceneCommand::HideProjectile {
            handle: projectile.handle,
        });
        true
    }

    /// Deactivate everything (game restart)
    pub fn reset(&mut self, scene: &mut Vec<SceneCommand>) {
        for slot in 0..self.slots.len() {
            self.deactivate(slot, scene);
        }
    }
}
