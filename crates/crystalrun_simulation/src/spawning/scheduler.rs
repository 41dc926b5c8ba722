//! SpawnScheduler — populate the corridor ahead, reclaim it behind
//!
//! # Architecture
//! - Каждая категория имеет свой gate (crystals/barriers по времени,
//!   obstacles/power-ups по пройденной камерой дистанции)
//! - Категории независимы: порядок spawn_* внутри тика не важен
//! - Cleanup идёт после spawn (новый entity никогда не удаляется в тот же тик)
//! - Barrier miss penalty: только через cleanup, только для unbroken,
//!   максимум один раз (entry сразу удаляется из registry)
//!
//! Вся случайность — из переданного ChaCha8Rng (детерминизм по seed).

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::components::{Barrier, Crystal, HandleAllocator, Obstacle, PowerUp};
use crate::config::SpawnConfig;
use crate::scene::SceneCommand;
use crate::spawning::gate::{DistanceGate, TimeGate};
use crate::spawning::patterns::ObstaclePattern;
use crate::spawning::registry::{Entry, Registries};

/// Per-tick spawn inputs
pub struct SpawnContext<'a> {
    /// Gameplay clock
    pub now: f32,
    pub camera_y: f32,
    pub rng: &'a mut ChaCha8Rng,
    pub handles: &'a mut HandleAllocator,
    pub scene: &'a mut Vec<SceneCommand>,
}

/// Number of entities created per category in one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub crystals: usize,
    pub barriers: usize,
    pub obstacles: usize,
    pub power_ups: usize,
}

impl SpawnReport {
    pub fn total(&self) -> usize {
        self.crystals + self.barriers + self.obstacles + self.power_ups
    }
}

/// Number of entities reclaimed per category in one cleanup pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub crystals: usize,
    pub barriers: usize,
    pub missed_barriers: usize,
    pub obstacles: usize,
    pub power_ups: usize,
}

/// Uniform sample; a collapsed or inverted range yields its lower bound
fn sample(rng: &mut ChaCha8Rng, range: [f32; 2]) -> f32 {
    if range[0] >= range[1] {
        return range[0];
    }
    rng.gen_range(range[0]..=range[1])
}

#[derive(Resource, Debug, Clone)]
pub struct SpawnScheduler {
    config: SpawnConfig,
    pub registries: Registries,
    crystal_gate: TimeGate,
    barrier_gate: TimeGate,
    obstacle_gate: DistanceGate,
    power_up_gate: DistanceGate,
}

impl SpawnScheduler {
    /// `camera_start_y` — стартовая метка distance gates
    pub fn new(config: SpawnConfig, camera_start_y: f32) -> Self {
        Self {
            crystal_gate: TimeGate::new(config.crystals.interval),
            barrier_gate: TimeGate::new(config.barriers.interval),
            obstacle_gate: DistanceGate::new(config.obstacles.spacing, camera_start_y),
            power_up_gate: DistanceGate::new(config.power_ups.spacing, camera_start_y),
            registries: Registries::default(),
            config,
        }
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    /// Run every spawn gate once
    pub fn tick_spawns(&mut self, ctx: &mut SpawnContext) -> SpawnReport {
        SpawnReport {
            crystals: self.spawn_crystals(ctx),
            barriers: self.spawn_barriers(ctx),
            obstacles: self.spawn_obstacles(ctx),
            power_ups: self.spawn_power_ups(ctx),
        }
    }

    /// Time gate → batch of crystals ahead of the camera (random x/z, jittered y)
    pub fn spawn_crystals(&mut self, ctx: &mut SpawnContext) -> usize {
        if !self.crystal_gate.try_trigger(ctx.now) {
            return 0;
        }

        let cfg = &self.config.crystals;
        for _ in 0..cfg.batch_size {
            let x = sample(ctx.rng, cfg.x_range);
            let z = sample(ctx.rng, cfg.z_range);
            let jitter = sample(ctx.rng, [0.0, cfg.ahead_jitter]);
            let position = Vec3::new(x, ctx.camera_y + cfg.ahead_distance + jitter, z);

            self.registries
                .insert(Crystal::new(position), ctx.handles, ctx.scene);
        }

        cfg.batch_size
    }

    /// Time gate → one barrier in a random lane
    pub fn spawn_barriers(&mut self, ctx: &mut SpawnContext) -> usize {
        if !self.barrier_gate.try_trigger(ctx.now) {
            return 0;
        }

        let cfg = &self.config.barriers;
        let Some(&x) = cfg.lanes.choose(ctx.rng) else {
            return 0;
        };
        let z = sample(ctx.rng, cfg.z_range);
        let position = Vec3::new(x, ctx.camera_y + cfg.ahead_distance, z);

        self.registries
            .insert(Barrier::new(position), ctx.handles, ctx.scene);
        1
    }

    /// Distance gate → one decorative pattern
    pub fn spawn_obstacles(&mut self, ctx: &mut SpawnContext) -> usize {
        if !self.obstacle_gate.try_trigger(ctx.camera_y) {
            return 0;
        }

        let y = ctx.camera_y + self.config.obstacles.ahead_distance;
        let pattern = ObstaclePattern::pick(ctx.rng);
        let shapes = pattern.build(y, ctx.rng);
        let count = shapes.len();

        for shape in shapes {
            self.registries.insert::<Obstacle>(shape, ctx.handles, ctx.scene);
        }

        count
    }

    /// Distance gate → one ammo box
    pub fn spawn_power_ups(&mut self, ctx: &mut SpawnContext) -> usize {
        if !self.config.power_ups.enabled {
            return 0;
        }
        if !self.power_up_gate.try_trigger(ctx.camera_y) {
            return 0;
        }

        let cfg = &self.config.power_ups;
        let Some(&bonus) = cfg.ammo_bonuses.choose(ctx.rng) else {
            return 0;
        };
        let x = sample(ctx.rng, cfg.x_range);
        let z = sample(ctx.rng, cfg.z_range);
        let position = Vec3::new(x, ctx.camera_y + cfg.ahead_distance, z);

        self.registries
            .insert(PowerUp::new(position, bonus), ctx.handles, ctx.scene);
        1
    }

    /// Scripted difficulty burst: two crystals and a barrier between them
    pub fn spawn_gauntlet(
        &mut self,
        start_y: f32,
        handles: &mut HandleAllocator,
        scene: &mut Vec<SceneCommand>,
    ) {
        let registries = &mut self.registries;
        registries.insert(Crystal::new(Vec3::new(-3.0, start_y, 2.0)), handles, scene);
        registries.insert(Crystal::new(Vec3::new(3.0, start_y + 5.0, 2.5)), handles, scene);
        registries.insert(Barrier::new(Vec3::new(0.0, start_y + 2.5, 2.5)), handles, scene);
    }

    /// Two demo crystals placed at game start
    pub fn spawn_opening_crystals(
        &mut self,
        handles: &mut HandleAllocator,
        scene: &mut Vec<SceneCommand>,
    ) {
        self.registries
            .insert(Crystal::new(Vec3::new(-2.0, 20.0, 2.0)), handles, scene);
        self.registries
            .insert(Crystal::new(Vec3::new(2.0, 30.0, 2.5)), handles, scene);
    }

    /// Remove everything that fell behind the camera
    ///
    /// `on_barrier_missed` вызывается для каждого unbroken barrier ровно
    /// один раз, до его удаления.
    pub fn cleanup_behind(
        &mut self,
        camera_y: f32,
        scene: &mut Vec<SceneCommand>,
        mut on_barrier_missed: impl FnMut(&Entry<Barrier>),
    ) -> CleanupReport {
        let cfg = &self.config;
        let registries = &mut self.registries;
        let mut missed_barriers = 0;

        let crystals = registries.remove_behind::<Crystal>(
            camera_y,
            cfg.crystals.cleanup_distance,
            scene,
            |_| {},
        );
        let barriers = registries.remove_behind::<Barrier>(
            camera_y,
            cfg.barriers.cleanup_distance,
            scene,
            |entry| {
                if !entry.data.broken {
                    missed_barriers += 1;
                    on_barrier_missed(entry);
                }
            },
        );
        let obstacles = registries.remove_behind::<Obstacle>(
            camera_y,
            cfg.obstacles.cleanup_distance,
            scene,
            |_| {},
        );
        let power_ups = registries.remove_behind::<PowerUp>(
            camera_y,
            cfg.power_ups.cleanup_distance,
            scene,
            |_| {},
        );

        CleanupReport {
            crystals,
            barriers,
            missed_barriers,
            obstacles,
            power_ups,
        }
    }

    /// Unbroken crystals still in the corridor (HUD counter)
    pub fn active_crystal_count(&self) -> usize {
        self.registries
            .crystals
            .iter()
            .filter(|entry| !entry.data.broken)
            .count()
    }

    /// Release every entity and re-arm the gates (game restart)
    pub fn clear_all(&mut self, camera_start_y: f32, scene: &mut Vec<SceneCommand>) {
        self.registries.clear(scene);
        self.crystal_gate.reset();
        self.barrier_gate.reset();
        self.obstacle_gate.reset(camera_start_y);
        self.power_up_gate.reset(camera_start_y);
    }
}
