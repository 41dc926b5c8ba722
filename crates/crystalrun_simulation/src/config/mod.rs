//! Gallery configuration (tuning constants + TOML loading)
//!
//! Все gameplay-константы живут здесь, а не в системах:
//! - camera: стартовая позиция и скорость полёта по коридору
//! - projectiles: размер pool, скорость, lifetime
//! - spawning: spawn gates и cleanup дистанции по категориям
//! - scoring: награды/штрафы, cooldown игрока
//! - game: стартовые score/ammo, seed, радиус игрока
//!
//! `Default` совпадает с балансом оригинальной игры, TOML-файл может
//! переопределить любую секцию частично (`#[serde(default)]`).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Root config resource
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub camera: CameraConfig,
    pub projectiles: ProjectileConfig,
    pub spawning: SpawnConfig,
    pub scoring: ScoringConfig,
    pub game: GameConfig,
}

impl GalleryConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GalleryConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Rejects values the loop cannot run with (empty pool, zero ammo, ...)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.projectiles.pool_size == 0 {
            return Err(ConfigError::Invalid("projectiles.pool_size must be > 0".into()));
        }
        if self.projectiles.lifetime <= 0.0 || self.projectiles.speed <= 0.0 {
            return Err(ConfigError::Invalid(
                "projectiles.speed and projectiles.lifetime must be > 0".into(),
            ));
        }
        if self.game.starting_ammo == 0 {
            return Err(ConfigError::Invalid("game.starting_ammo must be > 0".into()));
        }
        if self.camera.speed < 0.0 {
            return Err(ConfigError::Invalid("camera.speed must be >= 0".into()));
        }

        let spawning = &self.spawning;
        if spawning.crystals.interval <= 0.0 || spawning.barriers.interval <= 0.0 {
            return Err(ConfigError::Invalid("spawn intervals must be > 0".into()));
        }
        if spawning.obstacles.spacing <= 0.0 || spawning.power_ups.spacing <= 0.0 {
            return Err(ConfigError::Invalid("spawn spacings must be > 0".into()));
        }
        if spawning.barriers.lanes.is_empty() {
            return Err(ConfigError::Invalid("spawning.barriers.lanes must not be empty".into()));
        }
        if spawning.power_ups.ammo_bonuses.is_empty() {
            return Err(ConfigError::Invalid(
                "spawning.power_ups.ammo_bonuses must not be empty".into(),
            ));
        }
        for (name, range) in [
            ("crystals.x_range", spawning.crystals.x_range),
            ("crystals.z_range", spawning.crystals.z_range),
            ("barriers.z_range", spawning.barriers.z_range),
            ("power_ups.x_range", spawning.power_ups.x_range),
            ("power_ups.z_range", spawning.power_ups.z_range),
        ] {
            if range[0] > range[1] {
                return Err(ConfigError::Invalid(format!("spawning.{name} is inverted")));
            }
        }

        if spawning.crystals.ahead_jitter < 0.0 {
            return Err(ConfigError::Invalid(
                "spawning.crystals.ahead_jitter must be >= 0".into(),
            ));
        }
        // Отрицательная дистанция = entity удаляется в тике своего spawn
        for (name, distance) in [
            ("crystals.ahead_distance", spawning.crystals.ahead_distance),
            ("crystals.cleanup_distance", spawning.crystals.cleanup_distance),
            ("barriers.ahead_distance", spawning.barriers.ahead_distance),
            ("barriers.cleanup_distance", spawning.barriers.cleanup_distance),
            ("obstacles.ahead_distance", spawning.obstacles.ahead_distance),
            ("obstacles.cleanup_distance", spawning.obstacles.cleanup_distance),
            ("power_ups.ahead_distance", spawning.power_ups.ahead_distance),
            ("power_ups.cleanup_distance", spawning.power_ups.cleanup_distance),
        ] {
            if distance < 0.0 {
                return Err(ConfigError::Invalid(format!("spawning.{name} must be >= 0")));
            }
        }

        if self.scoring.player_hit_cooldown < 0.0 {
            return Err(ConfigError::Invalid("scoring.player_hit_cooldown must be >= 0".into()));
        }

        Ok(())
    }
}

/// Camera rig: игрок = камера, летит вдоль +Y
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub start_position: [f32; 3],
    /// Units per second along +Y
    pub speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            start_position: [0.0, -5.0, 2.0],
            speed: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub pool_size: usize,
    pub speed: f32,
    /// Seconds before an unimpacted projectile is recycled
    pub lifetime: f32,
    pub radius: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            pool_size: 12,
            speed: 80.0,
            lifetime: 3.0,
            radius: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub crystals: CrystalSpawnConfig,
    pub barriers: BarrierSpawnConfig,
    pub obstacles: ObstacleSpawnConfig,
    pub power_ups: PowerUpSpawnConfig,
    /// Two demo crystals placed before the first tick
    pub opening_crystals: bool,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            crystals: CrystalSpawnConfig::default(),
            barriers: BarrierSpawnConfig::default(),
            obstacles: ObstacleSpawnConfig::default(),
            power_ups: PowerUpSpawnConfig::default(),
            opening_crystals: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrystalSpawnConfig {
    pub interval: f32,
    pub batch_size: usize,
    pub ahead_distance: f32,
    pub ahead_jitter: f32,
    pub x_range: [f32; 2],
    pub z_range: [f32; 2],
    pub cleanup_distance: f32,
    pub radius: f32,
}

impl Default for CrystalSpawnConfig {
    fn default() -> Self {
        Self {
            interval: 3.0,
            batch_size: 2,
            ahead_distance: 20.0,
            ahead_jitter: 5.0,
            x_range: [-4.0, 4.0],
            z_range: [1.5, 3.5],
            cleanup_distance: 50.0,
            radius: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrierSpawnConfig {
    pub interval: f32,
    pub ahead_distance: f32,
    /// Lateral lanes (x), one picked uniformly per barrier
    pub lanes: Vec<f32>,
    pub z_range: [f32; 2],
    pub cleanup_distance: f32,
    pub radius: f32,
}

impl Default for BarrierSpawnConfig {
    fn default() -> Self {
        Self {
            interval: 8.0,
            ahead_distance: 30.0,
            lanes: vec![-2.0, 0.0, 2.0],
            z_range: [2.0, 3.5],
            cleanup_distance: 10.0,
            radius: 8.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleSpawnConfig {
    /// Camera travel between two decorative patterns
    pub spacing: f32,
    pub ahead_distance: f32,
    pub cleanup_distance: f32,
}

impl Default for ObstacleSpawnConfig {
    fn default() -> Self {
        Self {
            spacing: 10.0,
            ahead_distance: 30.0,
            cleanup_distance: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpSpawnConfig {
    pub enabled: bool,
    pub spacing: f32,
    pub ahead_distance: f32,
    pub x_range: [f32; 2],
    pub z_range: [f32; 2],
    pub ammo_bonuses: Vec<u32>,
    pub cleanup_distance: f32,
    pub radius: f32,
}

impl Default for PowerUpSpawnConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spacing: 60.0,
            ahead_distance: 35.0,
            x_range: [-3.0, 3.0],
            z_range: [1.5, 3.0],
            ammo_bonuses: vec![3, 5, 7],
            cleanup_distance: 50.0,
            radius: 1.2,
        }
    }
}

/// Reward for shooting a barrier down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierReward {
    Ammo(u32),
    Score(u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub crystal_score: u32,
    /// Ammo returned per broken crystal (0 = no refund)
    pub crystal_ammo_refund: u32,
    pub barrier_reward: BarrierReward,
    pub power_up_score: u32,
    pub barrier_collision_penalty: u32,
    pub barrier_miss_penalty: u32,
    /// Minimum seconds between two player-barrier penalties
    pub player_hit_cooldown: f32,
    pub pickup_message_seconds: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            crystal_score: 10,
            crystal_ammo_refund: 1,
            barrier_reward: BarrierReward::Ammo(3),
            power_up_score: 5,
            barrier_collision_penalty: 10,
            barrier_miss_penalty: 10,
            player_hit_cooldown: 0.5,
            pickup_message_seconds: 1.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub starting_score: u32,
    pub starting_ammo: u32,
    pub seed: u64,
    pub player_radius: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_score: 0,
            starting_ammo: 20,
            seed: 42,
            player_radius: 1.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GalleryConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.projectiles.pool_size, 12);
        assert_eq!(config.spawning.crystals.interval, 3.0);
        assert_eq!(config.spawning.barriers.interval, 8.0);
        assert_eq!(config.scoring.barrier_reward, BarrierReward::Ammo(3));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GalleryConfig::from_toml_str(
            r#"
            [projectiles]
            pool_size = 4

            [scoring]
            crystal_ammo_refund = 0
            barrier_reward = { score = 5 }
            "#,
        )
        .expect("valid config");

        assert_eq!(config.projectiles.pool_size, 4);
        assert_eq!(config.projectiles.speed, 80.0);
        assert_eq!(config.scoring.crystal_ammo_refund, 0);
        assert_eq!(config.scoring.barrier_reward, BarrierReward::Score(5));
        assert_eq!(config.game.starting_ammo, 20);
    }

    #[test]
    fn test_empty_pool_rejected() {
        let result = GalleryConfig::from_toml_str("[projectiles]\npool_size = 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let result = GalleryConfig::from_toml_str("[spawning.crystals]\nx_range = [4.0, -4.0]\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_jitter_rejected() {
        let result = GalleryConfig::from_toml_str("[spawning.crystals]\nahead_jitter = -1.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let zero = GalleryConfig::from_toml_str("[spawning.crystals]\nahead_jitter = 0.0\n");
        assert!(zero.is_ok());
    }

    #[test]
    fn test_negative_distances_rejected() {
        for source in [
            "[spawning.barriers]\ncleanup_distance = -100.0\n",
            "[spawning.crystals]\ncleanup_distance = -1.0\n",
            "[spawning.obstacles]\nahead_distance = -30.0\n",
            "[spawning.power_ups]\ncleanup_distance = -0.5\n",
        ] {
            let result = GalleryConfig::from_toml_str(source);
            assert!(matches!(result, Err(ConfigError::Invalid(_))), "{source}");
        }
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = GalleryConfig::from_toml_str("[projectiles\npool_size = 3");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = GalleryConfig::load("/definitely/not/here/crystalrun.toml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
