//! Game events — input from host, HUD/game-over output to host
//!
//! Host → Simulation: FireIntent, TogglePauseIntent, SpawnGauntletIntent
//! Simulation → Host: HudUpdate (push-only), GameOver

use bevy::prelude::*;

use crate::components::AimRay;
use crate::game::GameOverReason;

/// Event: player pressed fire
///
/// `aim = None` → стреляем вдоль camera forward (нет указателя в окне).
#[derive(Event, Debug, Clone, Default)]
pub struct FireIntent {
    pub aim: Option<AimRay>,
}

/// Event: pause key
#[derive(Event, Debug, Clone, Default)]
pub struct TogglePauseIntent;

/// Event: scripted difficulty burst at corridor depth `start_y`
#[derive(Event, Debug, Clone)]
pub struct SpawnGauntletIntent {
    pub start_y: f32,
}

/// Event: HUD text updates (core никогда не читает UI обратно)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum HudUpdate {
    Score(u32),
    Ammo(u32),
    CrystalCount(usize),
    TransientMessage { text: String, seconds: f32 },
}

/// Event: run finished (emitted once per run)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct GameOver {
    pub score: u32,
    pub seconds_played: u32,
    pub reason: GameOverReason,
}
