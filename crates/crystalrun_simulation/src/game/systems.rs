//! Orchestrator systems: input, clock/camera, HUD, terminal check, report

use bevy::prelude::*;

use crate::components::CameraRig;
use crate::game::{GameOver, GameState, HudUpdate, TogglePauseIntent};
use crate::scores::ScoreBoard;
use crate::spawning::SpawnScheduler;

/// Run condition: not paused, not game over
pub fn gameplay_active(state: Res<GameState>) -> bool {
    state.is_active()
}

/// System: pause toggles from the host
pub fn apply_pause_toggles(
    mut intents: EventReader<TogglePauseIntent>,
    mut state: ResMut<GameState>,
) {
    for _ in intents.read() {
        let paused = state.toggle_pause();
        crate::logger::log_info(if paused { "Game paused" } else { "Game resumed" });
    }
}

/// System: advance gameplay clock and camera rig by one fixed step
pub fn advance_world(
    time: Res<Time>,
    mut state: ResMut<GameState>,
    mut camera: ResMut<CameraRig>,
) {
    let dt = time.delta_secs();
    state.begin_tick();
    state.advance_clock(dt);
    camera.advance(dt);
}

/// Last values pushed to the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudSnapshot {
    pub score: u32,
    pub ammo: u32,
    pub crystals: usize,
}

/// System: push HUD counters when they change
pub fn publish_hud(
    state: Res<GameState>,
    scheduler: Res<SpawnScheduler>,
    mut last: Local<Option<HudSnapshot>>,
    mut hud_events: EventWriter<HudUpdate>,
) {
    let current = HudSnapshot {
        score: state.score,
        ammo: state.ammo,
        crystals: scheduler.active_crystal_count(),
    };

    let previous = last.replace(current);
    if previous == Some(current) {
        return;
    }

    if previous.map(|p| p.score) != Some(current.score) {
        hud_events.write(HudUpdate::Score(current.score));
    }
    if previous.map(|p| p.ammo) != Some(current.ammo) {
        hud_events.write(HudUpdate::Ammo(current.ammo));
    }
    if previous.map(|p| p.crystals) != Some(current.crystals) {
        hud_events.write(HudUpdate::CrystalCount(current.crystals));
    }
}

/// System: ammo exhausted / zero score after a collision penalty
pub fn check_terminal_conditions(mut state: ResMut<GameState>) {
    if let Some(reason) = state.evaluate_terminal() {
        crate::logger::log_warning(&format!(
            "GAME OVER ({:?}): score {}, ammo {}, {}s played",
            reason,
            state.score,
            state.ammo,
            state.seconds_played()
        ));
    }
}

/// System: persist the final score once and notify the host
pub fn report_game_over(
    mut state: ResMut<GameState>,
    mut scoreboard: ResMut<ScoreBoard>,
    mut game_over_events: EventWriter<GameOver>,
) {
    if !state.take_report() {
        return;
    }
    let Some(reason) = state.game_over_reason else {
        return;
    };

    let seconds_played = state.seconds_played();
    scoreboard.report_game_over(state.score, seconds_played);

    game_over_events.write(GameOver {
        score: state.score,
        seconds_played,
        reason,
    });
}
