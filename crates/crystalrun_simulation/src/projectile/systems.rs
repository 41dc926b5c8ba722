//! Projectile systems: pool motion/expiry, fire intents

use bevy::prelude::*;

use crate::components::CameraRig;
use crate::game::{FireIntent, GameState};
use crate::projectile::ProjectilePool;
use crate::scene::SceneCommand;

/// System: advance active projectiles, recycle expired ones
pub fn update_projectiles(
    time: Res<Time>,
    state: Res<GameState>,
    mut pool: ResMut<ProjectilePool>,
    mut scene_events: EventWriter<SceneCommand>,
) {
    let mut scene = Vec::new();
    let expired = pool.update(time.delta_secs(), state.elapsed, &mut scene);
    if expired > 0 {
        crate::logger::log(&format!("{} projectile(s) expired", expired));
    }
    scene_events.write_batch(scene);
}

/// System: FireIntent → pool spawn
///
/// - ammo == 0 → выстрела нет
/// - pool full → выстрел теряется, ammo не тратится
/// - на паузе / после game over intents отбрасываются
pub fn handle_fire_intents(
    mut intents: EventReader<FireIntent>,
    mut state: ResMut<GameState>,
    camera: Res<CameraRig>,
    mut pool: ResMut<ProjectilePool>,
    mut scene_events: EventWriter<SceneCommand>,
) {
    if !state.is_active() {
        intents.clear();
        return;
    }

    let mut scene = Vec::new();
    for intent in intents.read() {
        if state.ammo == 0 {
            crate::logger::log("Fire ignored: out of ammo");
            continue;
        }

        let ray = camera.aim_or_forward(intent.aim);
        if !pool.spawn(ray.origin, ray.direction, state.elapsed, &mut scene) {
            crate::logger::log("Fire dropped: projectile pool full");
            continue;
        }

        state.use_ammo();
        crate::logger::log(&format!(
            "Fired from {:?} dir {:?} (ammo left {})",
            ray.origin, ray.direction, state.ammo
        ));
    }
    scene_events.write_batch(scene);
}
