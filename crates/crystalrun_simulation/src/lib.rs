//! CRYSTALRUN Simulation Core
//!
//! ECS-симуляция shooter gallery на Bevy 0.16: камера летит по коридору,
//! игрок стреляет из pool'а снарядов по кристаллам и барьерам.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = gameplay state (pool, registries, score/ammo, collision rules)
//! - Host = визуалы, коллайдеры, collision traversal, UI, звук
//! - Связь только через typed events: SceneCommand / HudUpdate / GameOver
//!   наружу, CollisionPair / FireIntent / TogglePauseIntent внутрь

use bevy::prelude::*;
use rand::SeedableRng;
use bevy::time::TimeUpdateStrategy;
use rand_chacha::ChaCha8Rng;
use std::fmt::Write as _;
use std::time::Duration;

// Публичные модули
pub mod collision;
pub mod components;
pub mod config;
pub mod game;
pub mod headless;
pub mod logger;
pub mod projectile;
pub mod scene;
pub mod scores;
pub mod spawning;

// Re-export базовых типов для удобства
pub use collision::{CollisionDispatcher, CollisionOutcome, CollisionPair, CollisionPlugin};
pub use components::*;
pub use config::{ConfigError, GalleryConfig};
pub use game::{
    FireIntent, GameOver, GameOverReason, GamePlugin, GameState, GallerySet, HudUpdate,
    SpawnGauntletIntent, TogglePauseIntent,
};
pub use headless::{AutopilotPlugin, HeadlessHostPlugin, HeadlessScene};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel,
    LogPrinter,
};
pub use projectile::{ProjectilePlugin, ProjectilePool};
pub use scene::{EffectKind, SceneCommand, VisualKind};
pub use scores::{CsvScoreStore, MemoryScoreStore, ScoreBoard, ScoreStore};
pub use spawning::{SpawnPlugin, SpawnScheduler};

/// Fixed simulation tick rate
pub const TICK_HZ: f64 = 60.0;

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Config и RNG можно вставить заранее (тесты, binary с TOML).
/// GalleryConfig по умолчанию вставляет GamePlugin, здесь только seed.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DeterministicRng>() {
            let seed = app
                .world()
                .get_resource::<GalleryConfig>()
                .map(|config| config.game.seed)
                .unwrap_or_else(|| GalleryConfig::default().game.seed);
            app.insert_resource(DeterministicRng::new(seed));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            // Порядок важен: handles выдаются при build (player → pool → entities)
            .add_plugins((GamePlugin, ProjectilePlugin, SpawnPlugin, CollisionPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время ручное: каждый `app.update()` = ровно один fixed tick
/// (первый update только прогоняет Startup).
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(tick_duration()));

    app
}

pub fn tick_duration() -> Duration {
    Duration::from_secs_f64(1.0 / TICK_HZ)
}

/// Прогоняет `ticks` fixed tick'ов (после Startup update)
pub fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

/// Snapshot симуляции для сравнения детерминизма
///
/// Registries (в порядке вставки), pool и GameState в текстовом виде.
pub fn simulation_snapshot(world: &World) -> String {
    let mut snapshot = String::new();

    if let Some(state) = world.get_resource::<GameState>() {
        let _ = writeln!(
            snapshot,
            "state score={} ammo={} over={} t={:.4}",
            state.score, state.ammo, state.game_over, state.elapsed
        );
    }

    if let Some(pool) = world.get_resource::<ProjectilePool>() {
        for projectile in pool.iter_active() {
            let _ = writeln!(
                snapshot,
                "projectile {} {:?} {:?}",
                projectile.slot, projectile.handle, projectile.position
            );
        }
    }

    if let Some(scheduler) = world.get_resource::<SpawnScheduler>() {
        let registries = &scheduler.registries;
        for entry in registries.crystals.iter() {
            let _ = writeln!(snapshot, "crystal {:?} {:?}", entry.handle, entry.data);
        }
        for entry in registries.barriers.iter() {
            let _ = writeln!(snapshot, "barrier {:?} {:?}", entry.handle, entry.data);
        }
        for entry in registries.power_ups.iter() {
            let _ = writeln!(snapshot, "power_up {:?} {:?}", entry.handle, entry.data);
        }
        for entry in registries.obstacles.iter() {
            let _ = writeln!(snapshot, "obstacle {:?} {:?}", entry.handle, entry.data);
        }
    }

    snapshot
}
