//! Spawn/cleanup systems (thin ECS wrappers around SpawnScheduler)

use bevy::prelude::*;

use crate::components::{CameraRig, HandleAllocator};
use crate::config::GalleryConfig;
use crate::game::{GameState, PenaltyKind, SpawnGauntletIntent};
use crate::scene::SceneCommand;
use crate::spawning::{SpawnContext, SpawnScheduler};
use crate::DeterministicRng;

/// Startup: two demo crystals in front of the camera
pub fn spawn_opening_crystals(
    mut scheduler: ResMut<SpawnScheduler>,
    mut handles: ResMut<HandleAllocator>,
    mut scene_events: EventWriter<SceneCommand>,
) {
    if !scheduler.config().opening_crystals {
        return;
    }

    let mut scene = Vec::new();
    scheduler.spawn_opening_crystals(&mut handles, &mut scene);
    scene_events.write_batch(scene);
}

/// System: crystal/barrier/obstacle/power-up gates
pub fn run_spawn_gates(
    mut scheduler: ResMut<SpawnScheduler>,
    state: Res<GameState>,
    camera: Res<CameraRig>,
    mut rng: ResMut<DeterministicRng>,
    mut handles: ResMut<HandleAllocator>,
    mut scene_events: EventWriter<SceneCommand>,
) {
    let mut scene = Vec::new();
    let mut ctx = SpawnContext {
        now: state.elapsed,
        camera_y: camera.depth(),
        rng: &mut rng.rng,
        handles: &mut handles,
        scene: &mut scene,
    };

    let report = scheduler.tick_spawns(&mut ctx);
    if report.total() > 0 {
        crate::logger::log(&format!(
            "Spawned at y={:.1}: {} crystals, {} barriers, {} obstacles, {} power-ups",
            camera.depth(),
            report.crystals,
            report.barriers,
            report.obstacles,
            report.power_ups
        ));
    }

    scene_events.write_batch(scene);
}

/// System: scripted gauntlet requests from the host
pub fn spawn_requested_gauntlets(
    mut intents: EventReader<SpawnGauntletIntent>,
    state: Res<GameState>,
    mut scheduler: ResMut<SpawnScheduler>,
    mut handles: ResMut<HandleAllocator>,
    mut scene_events: EventWriter<SceneCommand>,
) {
    if !state.is_active() {
        let dropped = intents.read().count();
        if dropped > 0 {
            crate::logger::log(&format!("Dropped {} gauntlet request(s) while inactive", dropped));
        }
        return;
    }

    let mut scene = Vec::new();
    for intent in intents.read() {
        scheduler.spawn_gauntlet(intent.start_y, &mut handles, &mut scene);
        crate::logger::log_info(&format!("Gauntlet spawned at y={:.1}", intent.start_y));
    }
    scene_events.write_batch(scene);
}

/// System: reclaim entities behind the camera, penalize missed barriers
pub fn cleanup_behind_camera(
    mut scheduler: ResMut<SpawnScheduler>,
    mut state: ResMut<GameState>,
    camera: Res<CameraRig>,
    config: Res<GalleryConfig>,
    mut scene_events: EventWriter<SceneCommand>,
) {
    let penalty = config.scoring.barrier_miss_penalty;
    let mut scene = Vec::new();

    let report = scheduler.cleanup_behind(camera.depth(), &mut scene, |barrier| {
        let score = state.apply_penalty(penalty, PenaltyKind::BarrierMissed);
        crate::logger::log(&format!(
            "Barrier {:?} missed at y={:.1}: -{} (score {})",
            barrier.id, barrier.data.position.y, penalty, score
        ));
    });

    if report.missed_barriers > 0 {
        crate::logger::log_info(&format!(
            "{} unbroken barrier(s) left behind",
            report.missed_barriers
        ));
    }

    scene_events.write_batch(scene);
}
