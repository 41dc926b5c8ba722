//! GameState — score, ammo, pause, game over
//!
//! Инварианты:
//! - score и ammo никогда не отрицательные (u32 + saturating_sub)
//! - мутируют только эффекты dispatcher'а и terminal check оркестратора
//! - `elapsed` — gameplay clock, стоит на паузе и после game over

use bevy::prelude::*;

use crate::config::GameConfig;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    OutOfAmmo,
    OutOfScore,
}

/// Source of a score penalty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyKind {
    /// Unbroken barrier left behind the camera
    BarrierMissed,
    /// Player flew into an unbroken barrier
    BarrierCollision,
}

impl PenaltyKind {
    /// Only a collision penalty can end the run at zero score
    pub fn arms_game_over(&self) -> bool {
        matches!(self, PenaltyKind::BarrierCollision)
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameState {
    pub score: u32,
    pub ammo: u32,
    pub paused: bool,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
    /// Gameplay seconds since start
    pub elapsed: f32,
    penalty_armed: bool,
    reported: bool,
}

impl GameState {
    pub fn new(score: u32, ammo: u32) -> Self {
        Self {
            score,
            ammo,
            paused: false,
            game_over: false,
            game_over_reason: None,
            elapsed: 0.0,
            penalty_armed: false,
            reported: false,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.starting_score, config.starting_ammo)
    }

    /// Gameplay runs this tick
    pub fn is_active(&self) -> bool {
        !self.paused && !self.game_over
    }

    pub fn toggle_pause(&mut self) -> bool {
        if !self.game_over {
            self.paused = !self.paused;
        }
        self.paused
    }

    pub fn advance_clock(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Whole seconds played (persisted with the score)
    pub fn seconds_played(&self) -> u32 {
        self.elapsed.max(0.0) as u32
    }

    /// Clears per-tick latches, called once at the start of every tick
    pub fn begin_tick(&mut self) {
        self.penalty_armed = false;
    }

    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn add_ammo(&mut self, amount: u32) {
        self.ammo = self.ammo.saturating_add(amount);
    }

    /// Spends one round. False if the magazine is empty.
    pub fn use_ammo(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    /// Subtract points, clamped at 0. Returns the new score.
    pub fn apply_penalty(&mut self, points: u32, kind: PenaltyKind) -> u32 {
        self.score = self.score.saturating_sub(points);
        if kind.arms_game_over() {
            self.penalty_armed = true;
        }
        self.score
    }

    /// Terminal check (ammo exhausted, or a collision penalty left score at 0)
    ///
    /// Переводит state в game over при первом срабатывании.
    pub fn evaluate_terminal(&mut self) -> Option<GameOverReason> {
        if self.game_over {
            return None;
        }

        let reason = if self.ammo == 0 {
            GameOverReason::OutOfAmmo
        } else if self.penalty_armed && self.score == 0 {
            GameOverReason::OutOfScore
        } else {
            return None;
        };

        self.game_over = true;
        self.game_over_reason = Some(reason);
        Some(reason)
    }

    /// Marks the final score as persisted. True the first time only.
    pub fn take_report(&mut self) -> bool {
        if !self.game_over || self.reported {
            return false;
        }
        self.reported = true;
        true
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = GameState::default();
        assert_eq!(state.score, 0);
        assert_eq!(state.ammo, 20);
        assert!(state.is_active());
    }

    #[test]
    fn test_penalty_clamps_at_zero() {
        let mut state = GameState::new(15, 5);
        assert_eq!(state.apply_penalty(10, PenaltyKind::BarrierMissed), 5);
        assert_eq!(state.apply_penalty(10, PenaltyKind::BarrierMissed), 0);
        assert_eq!(state.apply_penalty(10, PenaltyKind::BarrierCollision), 0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_use_ammo_stops_at_zero() {
        let mut state = GameState::new(0, 1);
        assert!(state.use_ammo());
        assert_eq!(state.ammo, 0);
        assert!(!state.use_ammo());
        assert_eq!(state.ammo, 0);
    }

    #[test]
    fn test_out_of_ammo_is_terminal() {
        let mut state = GameState::new(50, 1);
        assert_eq!(state.evaluate_terminal(), None);

        state.use_ammo();
        assert_eq!(state.evaluate_terminal(), Some(GameOverReason::OutOfAmmo));
        assert!(state.game_over);
        assert!(!state.is_active());
        // Второй раз не срабатывает
        assert_eq!(state.evaluate_terminal(), None);
    }

    #[test]
    fn test_zero_score_alone_is_not_terminal() {
        // Стартовый score = 0, игра не должна закончиться сразу
        let mut state = GameState::new(0, 20);
        assert_eq!(state.evaluate_terminal(), None);

        state.apply_penalty(10, PenaltyKind::BarrierMissed);
        assert_eq!(state.evaluate_terminal(), None);
    }

    #[test]
    fn test_collision_penalty_to_zero_is_terminal() {
        let mut state = GameState::new(10, 20);
        state.begin_tick();
        state.apply_penalty(10, PenaltyKind::BarrierCollision);
        assert_eq!(state.evaluate_terminal(), Some(GameOverReason::OutOfScore));
    }

    #[test]
    fn test_penalty_latch_resets_each_tick() {
        let mut state = GameState::new(30, 20);
        state.apply_penalty(10, PenaltyKind::BarrierCollision);
        assert_eq!(state.evaluate_terminal(), None); // score 20

        state.begin_tick();
        state.apply_penalty(20, PenaltyKind::BarrierMissed);
        assert_eq!(state.score, 0);
        assert_eq!(state.evaluate_terminal(), None);
    }

    #[test]
    fn test_pause_toggle_ignored_after_game_over() {
        let mut state = GameState::new(0, 1);
        assert!(state.toggle_pause());
        assert!(!state.toggle_pause());

        state.use_ammo();
        state.evaluate_terminal();
        assert!(!state.toggle_pause());
    }

    #[test]
    fn test_report_taken_once() {
        let mut state = GameState::new(0, 1);
        assert!(!state.take_report()); // игра ещё идёт

        state.use_ammo();
        state.evaluate_terminal();
        assert!(state.take_report());
        assert!(!state.take_report());
    }

    #[test]
    fn test_seconds_played_truncates() {
        let mut state = GameState::default();
        state.advance_clock(2.75);
        assert_eq!(state.seconds_played(), 2);
    }
}
