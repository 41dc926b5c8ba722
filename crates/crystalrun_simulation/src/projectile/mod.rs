//! Projectile module — fixed pool of reusable shots
//!
//! ECS ответственность:
//! - ProjectilePool resource (motion, lifetime, active flag)
//! - FireIntent → spawn (ammo списывается только при успешном spawn)
//!
//! Host ответственность:
//! - visual per slot (создаётся один раз, show/hide по SceneCommand)
//! - позиции в полёте читаются из ProjectilePool

use bevy::prelude::*;

pub mod pool;
pub mod systems;


pub use pool::{Projectile, ProjectilePool};

use crate::components::HandleAllocator;
use crate::config::GalleryConfig;
use crate::game::{gameplay_active, GallerySet};
use crate::scene::{SceneCommand, VisualKind};

/// Projectile Plugin
///
/// Порядок выполнения (GallerySet::Projectiles):
/// 1. update_projectiles — motion + expiry (только в активной игре)
/// 2. handle_fire_intents — новые выстрелы
pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GalleryConfig>()
            .map(|config| config.projectiles.clone())
            .unwrap_or_default();

        app.init_resource::<HandleAllocator>();
        let pool = {
            let mut handles = app.world_mut().resource_mut::<HandleAllocator>();
            ProjectilePool::new(&config, &mut handles)
        };

        crate::logger::log(&format!(
            "Projectile pool: {} slots, speed {}, lifetime {}s",
            pool.capacity(),
            config.speed,
            config.lifetime
        ));

        app.insert_resource(pool);
        app.add_systems(Startup, spawn_projectile_visuals);

        app.add_systems(
            FixedUpdate,
            (
                systems::update_projectiles.run_if(gameplay_active),
                systems::handle_fire_intents,
            )
                .chain()
                .in_set(GallerySet::Projectiles),
        );
    }
}

/// Startup: one hidden visual per slot
fn spawn_projectile_visuals(pool: Res<ProjectilePool>, mut scene_events: EventWriter<SceneCommand>) {
    scene_events.write_batch(pool.slots().iter().map(|projectile| SceneCommand::Spawn {
        handle: projectile.handle,
        kind: VisualKind::Projectile,
        position: projectile.position,
    }));
}
