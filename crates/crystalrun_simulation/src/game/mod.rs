//! Game module — loop orchestration, score/ammo state, HUD and game over
//!
//! Порядок тика (FixedUpdate, `GallerySet` chain):
//! 1. Input — pause toggles
//! 2. Motion — gameplay clock + camera (skip если paused/game over)
//! 3. Projectiles — pool update, затем fire intents
//! 4. Spawn — gates + scripted gauntlets
//! 5. Cleanup — после spawn, новые entities не удаляются в том же тике
//! 6. Hud — derived counters
//! 7. Traverse — host collision traversal → CollisionPair
//! 8. Resolve — CollisionDispatcher
//! 9. Terminal — game over check
//! 10. Report — score store + GameOver event (один раз)

use bevy::prelude::*;

pub mod events;
pub mod state;
pub mod systems;

pub use events::{FireIntent, GameOver, HudUpdate, SpawnGauntletIntent, TogglePauseIntent};
pub use state::{GameOverReason, GameState, PenaltyKind};
pub use systems::{gameplay_active, HudSnapshot};

use crate::components::{CameraRig, HandleAllocator};
use crate::config::GalleryConfig;
use crate::scene::SceneCommand;
use crate::scores::ScoreBoard;

/// Per-tick phases, chained in this order
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GallerySet {
    Input,
    Motion,
    Projectiles,
    Spawn,
    Cleanup,
    Hud,
    /// Host-owned: collision traversal
    Traverse,
    Resolve,
    Terminal,
    Report,
}

/// Game Plugin (orchestrator)
///
/// Владеет GameState, CameraRig (world context) и player handle.
/// Должен быть добавлен до Projectile/Spawn/Collision плагинов:
/// handles выдаются в порядке build.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GalleryConfig>()
            .cloned()
            .unwrap_or_default();

        if !app.world().contains_resource::<GalleryConfig>() {
            app.insert_resource(config.clone());
        }
        if !app.world().contains_resource::<ScoreBoard>() {
            app.insert_resource(ScoreBoard::default());
        }

        app.init_resource::<HandleAllocator>();
        let player = app.world_mut().resource_mut::<HandleAllocator>().allocate();

        let [x, y, z] = config.camera.start_position;
        app.insert_resource(CameraRig::new(Vec3::new(x, y, z), config.camera.speed, player))
            .insert_resource(GameState::from_config(&config.game));

        app.add_event::<SceneCommand>()
            .add_event::<FireIntent>()
            .add_event::<TogglePauseIntent>()
            .add_event::<SpawnGauntletIntent>()
            .add_event::<HudUpdate>()
            .add_event::<GameOver>();

        app.configure_sets(
            FixedUpdate,
            (
                GallerySet::Input,
                GallerySet::Motion.run_if(gameplay_active),
                GallerySet::Projectiles,
                GallerySet::Spawn,
                GallerySet::Cleanup.run_if(gameplay_active),
                GallerySet::Hud,
                GallerySet::Traverse.run_if(gameplay_active),
                GallerySet::Resolve.run_if(gameplay_active),
                GallerySet::Terminal.run_if(gameplay_active),
                GallerySet::Report,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::apply_pause_toggles.in_set(GallerySet::Input),
                systems::advance_world.in_set(GallerySet::Motion),
                systems::publish_hud.in_set(GallerySet::Hud),
                systems::check_terminal_conditions.in_set(GallerySet::Terminal),
                systems::report_game_over.in_set(GallerySet::Report),
            ),
        );

        crate::logger::log_info(&format!(
            "Game ready: score {}, ammo {}, camera {:?}",
            config.game.starting_score, config.game.starting_ammo, config.camera.start_position
        ));
    }
}
