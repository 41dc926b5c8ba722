//! Spawning module — procedural corridor population + cleanup
//!
//! ECS ответственность:
//! - SpawnScheduler resource: gates, registries, reverse index
//! - Spawn системы в `GallerySet::Spawn`, cleanup в `GallerySet::Cleanup`
//!
//! Host ответственность:
//! - создать/удалить visual + collider по `SceneCommand::Spawn/Despawn`

use bevy::prelude::*;

pub mod gate;
pub mod patterns;
pub mod registry;
pub mod scheduler;
pub mod systems;

#[cfg(test)]
mod scheduler_tests;

pub use gate::{DistanceGate, TimeGate};
pub use patterns::ObstaclePattern;
pub use registry::{EntityRef, Entry, Registries, Registry, Tracked};
pub use scheduler::{CleanupReport, SpawnContext, SpawnReport, SpawnScheduler};

use crate::config::GalleryConfig;
use crate::game::{gameplay_active, GallerySet};

/// Spawn Plugin
///
/// Порядок выполнения:
/// 1. run_spawn_gates + spawn_requested_gauntlets (GallerySet::Spawn)
///    gauntlet intents читаются каждый тик, на паузе отбрасываются
/// 2. cleanup_behind_camera (GallerySet::Cleanup, всегда после spawn)
pub struct SpawnPlugin;

impl Plugin for SpawnPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GalleryConfig>()
            .cloned()
            .unwrap_or_default();
        let camera_start_y = config.camera.start_position[1];

        app.insert_resource(SpawnScheduler::new(config.spawning, camera_start_y));

        app.add_systems(Startup, systems::spawn_opening_crystals);

        app.add_systems(
            FixedUpdate,
            (
                (
                    systems::run_spawn_gates.run_if(gameplay_active),
                    systems::spawn_requested_gauntlets,
                )
                    .chain()
                    .in_set(GallerySet::Spawn),
                systems::cleanup_behind_camera.in_set(GallerySet::Cleanup),
            ),
        );
    }
}
