//! Scores module — per-user score persistence behind a trait
//!
//! Core только отчитывается о game over и спрашивает best score;
//! формат хранения — деталь реализации `ScoreStore`.
//! - MemoryScoreStore: тесты, headless runs без файла
//! - CsvScoreStore: `username,score,date,time_played`

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

pub mod csv_store;
pub mod memory;

pub use csv_store::CsvScoreStore;
pub use memory::MemoryScoreStore;

#[derive(Debug, Error)]
pub enum ScoreStoreError {
    #[error("score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("score file is malformed: {0}")]
    Csv(#[from] csv::Error),
}

/// One finished game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub username: String,
    pub score: u32,
    /// Local time, `%Y-%m-%d %H:%M:%S`
    pub date: String,
    /// Whole seconds
    pub time_played: u32,
}

impl ScoreRecord {
    pub fn now(username: &str, score: u32, time_played: u32) -> Self {
        Self {
            username: username.to_string(),
            score,
            date: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            time_played,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UserStats {
    pub total_games: usize,
    pub best_score: u32,
    pub average_score: f32,
    pub total_time: u32,
}

/// Persistent sink/source for finished games
///
/// Реализации дают `records` + `append`, запросы считаются поверх них.
pub trait ScoreStore: Send + Sync {
    /// Every stored record, oldest first
    fn records(&self) -> Result<Vec<ScoreRecord>, ScoreStoreError>;

    fn append(&mut self, record: ScoreRecord) -> Result<(), ScoreStoreError>;

    fn report_game_over(
        &mut self,
        username: &str,
        score: u32,
        seconds_played: u32,
    ) -> Result<(), ScoreStoreError> {
        self.append(ScoreRecord::now(username, score, seconds_played))
    }

    /// 0 if the user never finished a game
    fn best_score(&self, username: &str) -> Result<u32, ScoreStoreError> {
        Ok(self
            .records()?
            .iter()
            .filter(|r| r.username == username)
            .map(|r| r.score)
            .max()
            .unwrap_or(0))
    }

    /// User's games, best first
    fn user_scores(&self, username: &str, limit: usize) -> Result<Vec<ScoreRecord>, ScoreStoreError> {
        let mut records: Vec<ScoreRecord> = self
            .records()?
            .into_iter()
            .filter(|r| r.username == username)
            .collect();
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(limit);
        Ok(records)
    }

    /// All users' games, best first
    fn global_highscores(&self, limit: usize) -> Result<Vec<ScoreRecord>, ScoreStoreError> {
        let mut records = self.records()?;
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(limit);
        Ok(records)
    }

    fn user_stats(&self, username: &str) -> Result<UserStats, ScoreStoreError> {
        let records: Vec<ScoreRecord> = self
            .records()?
            .into_iter()
            .filter(|r| r.username == username)
            .collect();
        if records.is_empty() {
            return Ok(UserStats::default());
        }

        let total: u64 = records.iter().map(|r| u64::from(r.score)).sum();
        Ok(UserStats {
            total_games: records.len(),
            best_score: records.iter().map(|r| r.score).max().unwrap_or(0),
            average_score: total as f32 / records.len() as f32,
            total_time: records.iter().map(|r| r.time_played).sum(),
        })
    }
}

/// Score store + logged-in user (resource)
#[derive(Resource)]
pub struct ScoreBoard {
    store: Box<dyn ScoreStore>,
    user: Option<String>,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self::new(Box::new(MemoryScoreStore::default()), None)
    }
}

impl ScoreBoard {
    pub fn new(store: Box<dyn ScoreStore>, user: Option<String>) -> Self {
        Self { store, user }
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn set_user(&mut self, user: Option<String>) {
        self.user = user;
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Best score of the current user (0 without a user or on store error)
    pub fn best_score(&self) -> u32 {
        let Some(user) = self.user.as_deref() else {
            return 0;
        };
        match self.store.best_score(user) {
            Ok(best) => best,
            Err(err) => {
                crate::logger::log_error(&format!("Failed to read best score: {}", err));
                0
            }
        }
    }

    /// Persist a finished game. Store errors are logged, never propagated.
    pub fn report_game_over(&mut self, score: u32, seconds_played: u32) -> bool {
        let Some(user) = self.user.as_deref() else {
            crate::logger::log_warning("No user logged in, score not saved");
            return false;
        };

        match self.store.report_game_over(user, score, seconds_played) {
            Ok(()) => {
                crate::logger::log_info(&format!(
                    "Score saved for {}: {} points, {}s",
                    user, score, seconds_played
                ));
                true
            }
            Err(err) => {
                crate::logger::log_error(&format!("Failed to save score for {}: {}", user, err));
                false
            }
        }
    }
}
