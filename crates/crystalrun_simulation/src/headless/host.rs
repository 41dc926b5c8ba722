//! Scene mirror + sphere-overlap collision traversal

use bevy::prelude::*;
use std::collections::BTreeMap;

use crate::collision::CollisionPair;
use crate::components::{CameraRig, SceneHandle};
use crate::config::GalleryConfig;
use crate::projectile::ProjectilePool;
use crate::scene::{SceneCommand, VisualKind};

/// Collision sphere radii per visual kind
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ColliderRadii {
    pub projectile: f32,
    pub crystal: f32,
    pub barrier: f32,
    pub power_up: f32,
    pub player: f32,
}

impl ColliderRadii {
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            projectile: config.projectiles.radius,
            crystal: config.spawning.crystals.radius,
            barrier: config.spawning.barriers.radius,
            power_up: config.spawning.power_ups.radius,
            player: config.game.player_radius,
        }
    }

    /// Obstacles are decorative and have no collider
    pub fn for_kind(&self, kind: VisualKind) -> Option<f32> {
        match kind {
            VisualKind::Projectile => Some(self.projectile),
            VisualKind::Crystal => Some(self.crystal),
            VisualKind::Barrier => Some(self.barrier),
            VisualKind::PowerUp { .. } => Some(self.power_up),
            VisualKind::Obstacle(_) => None,
        }
    }
}

impl Default for ColliderRadii {
    fn default() -> Self {
        Self::from_config(&GalleryConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessVisual {
    pub kind: VisualKind,
    pub position: Vec3,
    pub visible: bool,
    pub collidable: bool,
}

/// Host-side mirror of every live handle (ordered for deterministic traversal)
#[derive(Resource, Debug, Default)]
pub struct HeadlessScene {
    visuals: BTreeMap<SceneHandle, HeadlessVisual>,
    pub effects_played: usize,
    pub despawned: usize,
    /// Commands that referenced a handle the host never created
    pub orphan_commands: usize,
}

impl HeadlessScene {
    pub fn get(&self, handle: SceneHandle) -> Option<&HeadlessVisual> {
        self.visuals.get(&handle)
    }

    pub fn len(&self) -> usize {
        self.visuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visuals.is_empty()
    }

    pub fn visible_projectiles(&self) -> usize {
        self.visuals
            .values()
            .filter(|v| v.kind == VisualKind::Projectile && v.visible)
            .count()
    }

    /// Collidable non-projectile visuals in handle order
    pub fn targets(&self) -> impl Iterator<Item = (SceneHandle, &HeadlessVisual)> {
        self.visuals
            .iter()
            .filter(|(_, v)| v.collidable && v.kind != VisualKind::Projectile)
            .map(|(handle, v)| (*handle, v))
    }

    pub fn apply(&mut self, command: &SceneCommand) {
        match command {
            SceneCommand::Spawn {
                handle,
                kind,
                position,
            } => {
                let live = *kind != VisualKind::Projectile;
                self.visuals.insert(
                    *handle,
                    HeadlessVisual {
                        kind: *kind,
                        position: *position,
                        visible: live,
                        collidable: live,
                    },
                );
            }
            SceneCommand::Despawn { handle } => {
                if self.visuals.remove(handle).is_some() {
                    self.despawned += 1;
                } else {
                    self.orphan_commands += 1;
                }
            }
            SceneCommand::Shatter { handle } | SceneCommand::HideProjectile { handle } => {
                self.set_state(*handle, None, false);
            }
            SceneCommand::ShowProjectile { handle, position } => {
                self.set_state(*handle, Some(*position), true);
            }
            SceneCommand::PlayEffect { .. } => {
                self.effects_played += 1;
            }
        }
    }

    fn set_state(&mut self, handle: SceneHandle, position: Option<Vec3>, live: bool) {
        let Some(visual) = self.visuals.get_mut(&handle) else {
            self.orphan_commands += 1;
            return;
        };
        if let Some(position) = position {
            visual.position = position;
        }
        visual.visible = live;
        visual.collidable = live;
    }
}

/// System: mirror this tick's scene commands
pub fn apply_scene_commands(
    mut commands: EventReader<SceneCommand>,
    mut scene: ResMut<HeadlessScene>,
) {
    for command in commands.read() {
        scene.apply(command);
    }
}

/// System: sphere-overlap traversal (projectile × target, player × barrier)
///
/// Пара отправляется каждый тик, пока overlap длится: дедупликация —
/// забота dispatcher'а (флаги + cooldown).
pub fn detect_overlaps(
    pool: Res<ProjectilePool>,
    scene: Res<HeadlessScene>,
    camera: Res<CameraRig>,
    radii: Res<ColliderRadii>,
    mut pairs: EventWriter<CollisionPair>,
) {
    for projectile in pool.iter_active() {
        for (handle, target) in scene.targets() {
            let Some(radius) = radii.for_kind(target.kind) else {
                continue;
            };
            if projectile.position.distance(target.position) <= radii.projectile + radius {
                pairs.write(CollisionPair::new(projectile.handle, handle));
            }
        }
    }

    for (handle, target) in scene.targets() {
        if target.kind != VisualKind::Barrier {
            continue;
        }
        if camera.position.distance(target.position) <= radii.player + radii.barrier {
            pairs.write(CollisionPair::new(camera.player, handle));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::ObstacleShape;

    #[test]
    fn test_mirror_tracks_projectile_visibility() {
        let mut scene = HeadlessScene::default();
        let handle = SceneHandle(3);

        scene.apply(&SceneCommand::Spawn {
            handle,
            kind: VisualKind::Projectile,
            position: Vec3::ZERO,
        });
        assert_eq!(scene.visible_projectiles(), 0);

        scene.apply(&SceneCommand::ShowProjectile {
            handle,
            position: Vec3::Y,
        });
        assert_eq!(scene.visible_projectiles(), 1);

        scene.apply(&SceneCommand::HideProjectile { handle });
        assert_eq!(scene.visible_projectiles(), 0);
        assert_eq!(scene.orphan_commands, 0);
    }

    #[test]
    fn test_shatter_disables_collider() {
        let mut scene = HeadlessScene::default();
        let handle = SceneHandle(9);
        scene.apply(&SceneCommand::Spawn {
            handle,
            kind: VisualKind::Crystal,
            position: Vec3::ZERO,
        });
        assert_eq!(scene.targets().count(), 1);

        scene.apply(&SceneCommand::Shatter { handle });
        assert_eq!(scene.targets().count(), 0);

        scene.apply(&SceneCommand::Despawn { handle });
        assert!(scene.is_empty());
        assert_eq!(scene.despawned, 1);
    }

    #[test]
    fn test_unknown_handle_counts_as_orphan() {
        let mut scene = HeadlessScene::default();
        scene.apply(&SceneCommand::Despawn {
            handle: SceneHandle(77),
        });
        assert_eq!(scene.orphan_commands, 1);
    }

    #[test]
    fn test_obstacles_have_no_collider() {
        let radii = ColliderRadii::default();
        assert_eq!(radii.for_kind(VisualKind::Obstacle(ObstacleShape::Beam)), None);
        assert_eq!(radii.for_kind(VisualKind::Barrier), Some(8.5));
    }
}
