//! Autopilot — scripted shooter for headless runs

use bevy::prelude::*;
use std::collections::BTreeSet;

use crate::components::{AimRay, CameraRig, SceneHandle};
use crate::game::{FireIntent, GameState};
use crate::headless::HeadlessScene;
use crate::scene::VisualKind;

#[derive(Resource, Debug, Clone)]
pub struct Autopilot {
    /// Minimum seconds between two shots
    pub fire_interval: f32,
    /// Only targets at most this far ahead of the camera are engaged
    pub range: f32,
    last_shot: Option<f32>,
    engaged: BTreeSet<SceneHandle>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_interval: 0.25,
            range: 40.0,
            last_shot: None,
            engaged: BTreeSet::new(),
        }
    }
}

impl Autopilot {
    fn ready(&self, now: f32) -> bool {
        self.last_shot
            .is_none_or(|last| now - last >= self.fire_interval)
    }

    /// Nearest collidable target ahead that was not shot at yet
    fn pick_target(&self, scene: &HeadlessScene, camera: &CameraRig) -> Option<(SceneHandle, Vec3)> {
        scene
            .targets()
            .filter(|(handle, _)| !self.engaged.contains(handle))
            .filter(|(_, visual)| {
                matches!(
                    visual.kind,
                    VisualKind::Crystal | VisualKind::Barrier | VisualKind::PowerUp { .. }
                )
            })
            .filter(|(_, visual)| {
                let ahead = visual.position.y - camera.depth();
                ahead > 0.0 && ahead <= self.range
            })
            .min_by(|(_, a), (_, b)| {
                let da = a.position.distance_squared(camera.position);
                let db = b.position.distance_squared(camera.position);
                da.total_cmp(&db)
            })
            .map(|(handle, visual)| (handle, visual.position))
    }
}

/// System: aim at the nearest target and emit a FireIntent
pub fn autopilot_fire(
    mut autopilot: ResMut<Autopilot>,
    scene: Res<HeadlessScene>,
    camera: Res<CameraRig>,
    state: Res<GameState>,
    mut intents: EventWriter<FireIntent>,
) {
    // Забываем цели, которых больше нет в сцене
    autopilot
        .engaged
        .retain(|handle| scene.get(*handle).is_some_and(|v| v.collidable));

    if state.ammo == 0 || !autopilot.ready(state.elapsed) {
        return;
    }
    let Some((handle, target)) = autopilot.pick_target(&scene, &camera) else {
        return;
    };

    intents.write(FireIntent {
        aim: Some(AimRay {
            origin: camera.position,
            direction: target - camera.position,
        }),
    });
    autopilot.last_shot = Some(state.elapsed);
    autopilot.engaged.insert(handle);
}
