//! Collision resolution system

use bevy::prelude::*;

use crate::collision::{CollisionContext, CollisionDispatcher, CollisionOutcome, CollisionPair};
use crate::components::CameraRig;
use crate::game::{GameState, HudUpdate};
use crate::projectile::ProjectilePool;
use crate::scene::SceneCommand;
use crate::spawning::SpawnScheduler;

/// System: drain this tick's CollisionPair events through the dispatcher
///
/// Host traversal (GallerySet::Traverse) отработал раньше в этом тике,
/// поэтому все пары текущего кадра уже в очереди.
pub fn resolve_collisions(
    mut pairs: EventReader<CollisionPair>,
    mut dispatcher: ResMut<CollisionDispatcher>,
    mut pool: ResMut<ProjectilePool>,
    mut scheduler: ResMut<SpawnScheduler>,
    mut state: ResMut<GameState>,
    camera: Res<CameraRig>,
    mut scene_events: EventWriter<SceneCommand>,
    mut hud_events: EventWriter<HudUpdate>,
) {
    let mut scene = Vec::new();
    let mut hud = Vec::new();
    let now = state.elapsed;

    let mut ctx = CollisionContext {
        now,
        player: camera.player,
        pool: &mut pool,
        registries: &mut scheduler.registries,
        state: &mut state,
        scene: &mut scene,
        hud: &mut hud,
    };

    for pair in pairs.read() {
        let outcome = dispatcher.resolve(pair, &mut ctx);
        match outcome {
            CollisionOutcome::Ignored | CollisionOutcome::PlayerHitCooldown => {}
            CollisionOutcome::PlayerHitBarrier { penalty, score } => {
                crate::logger::log_info(&format!(
                    "Player hit barrier at t={:.2}: -{} (score {})",
                    now, penalty, score
                ));
            }
            other => {
                crate::logger::log(&format!("Collision {:?} ↔ {:?}: {:?}", pair.from, pair.into, other));
            }
        }
    }

    scene_events.write_batch(scene);
    hud_events.write_batch(hud);
}
