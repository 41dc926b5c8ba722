//! Scene bridge — commands from simulation to the render/scene host
//!
//! Architecture:
//! - Simulation владеет gameplay state (pool, registries, score)
//! - Host владеет визуалами, коллайдерами, FX, звуком
//! - SceneCommand (Simulation → Host): spawn/despawn/show/hide/FX
//! - CollisionPair (Host → Simulation): см. `collision::events`
//!
//! Симуляция пишет команды в `Vec<SceneCommand>` outbox, системы
//! сбрасывают outbox в `EventWriter<SceneCommand>` одним batch.

use bevy::prelude::*;

use crate::components::{ObstacleShape, SceneHandle};

/// Visual the host should instantiate for a handle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualKind {
    Projectile,
    Crystal,
    Barrier,
    PowerUp { ammo_bonus: u32 },
    Obstacle(ObstacleShape),
}

/// Fire-and-forget cosmetic effect (fragments, particles, sound)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    CrystalShatter,
    BarrierShatter,
    PowerUpBurst,
}

/// Event: simulation → host
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SceneCommand {
    /// Create visual + collider for a new entity
    Spawn {
        handle: SceneHandle,
        kind: VisualKind,
        position: Vec3,
    },

    /// Release visual + collider (entity left its registry)
    Despawn { handle: SceneHandle },

    /// Target was broken: hide the intact model and stop its collider
    Shatter { handle: SceneHandle },

    /// Pool slot became active at `position`
    ShowProjectile { handle: SceneHandle, position: Vec3 },

    /// Pool slot became inactive
    HideProjectile { handle: SceneHandle },

    PlayEffect { effect: EffectKind, position: Vec3 },
}

impl SceneCommand {
    /// Handle this command refers to (FX have none)
    pub fn handle(&self) -> Option<SceneHandle> {
        match self {
            SceneCommand::Spawn { handle, .. }
            | SceneCommand::Despawn { handle }
            | SceneCommand::Shatter { handle }
            | SceneCommand::ShowProjectile { handle, .. }
            | SceneCommand::HideProjectile { handle } => Some(*handle),
            SceneCommand::PlayEffect { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_handle() {
        let spawn = SceneCommand::Spawn {
            handle: SceneHandle(7),
            kind: VisualKind::Crystal,
            position: Vec3::ZERO,
        };
        assert_eq!(spawn.handle(), Some(SceneHandle(7)));

        let fx = SceneCommand::PlayEffect {
            effect: EffectKind::CrystalShatter,
            position: Vec3::ZERO,
        };
        assert_eq!(fx.handle(), None);
    }
}
