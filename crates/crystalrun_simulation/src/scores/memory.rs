//! In-memory score store

use crate::scores::{ScoreRecord, ScoreStore, ScoreStoreError};

#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    records: Vec<ScoreRecord>,
}

impl MemoryScoreStore {
    pub fn with_records(records: Vec<ScoreRecord>) -> Self {
        Self { records }
    }
}

impl ScoreStore for MemoryScoreStore {
    fn records(&self) -> Result<Vec<ScoreRecord>, ScoreStoreError> {
        Ok(self.records.clone())
    }

    fn append(&mut self, record: ScoreRecord) -> Result<(), ScoreStoreError> {
        self.records.push(record);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scores::{ScoreBoard, UserStats};

    fn record(user: &str, score: u32, time: u32) -> ScoreRecord {
        ScoreRecord {
            username: user.to_string(),
            score,
            date: "2024-01-01 12:00:00".to_string(),
            time_played: time,
        }
    }

    #[test]
    fn test_best_score_defaults_to_zero() {
        let store = MemoryScoreStore::default();
        assert_eq!(store.best_score("ana").unwrap(), 0);
    }

    #[test]
    fn test_queries_sort_best_first() {
        let store = MemoryScoreStore::with_records(vec![
            record("ana", 30, 40),
            record("bo", 90, 10),
            record("ana", 70, 20),
            record("ana", 50, 30),
        ]);

        assert_eq!(store.best_score("ana").unwrap(), 70);

        let scores: Vec<u32> = store.user_scores("ana", 2).unwrap().iter().map(|r| r.score).collect();
        assert_eq!(scores, vec![70, 50]);

        let global = store.global_highscores(3).unwrap();
        let top: Vec<(&str, u32)> = global.iter().map(|r| (r.username.as_str(), r.score)).collect();
        assert_eq!(top, vec![("bo", 90), ("ana", 70), ("ana", 50)]);
    }

    #[test]
    fn test_user_stats() {
        let store = MemoryScoreStore::with_records(vec![
            record("ana", 30, 40),
            record("ana", 60, 20),
            record("bo", 90, 10),
        ]);

        let stats = store.user_stats("ana").unwrap();
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.best_score, 60);
        assert_eq!(stats.average_score, 45.0);
        assert_eq!(stats.total_time, 60);

        assert_eq!(store.user_stats("nobody").unwrap(), UserStats::default());
    }

    #[test]
    fn test_scoreboard_requires_user() {
        let mut board = ScoreBoard::default();
        assert!(!board.report_game_over(40, 12));
        assert_eq!(board.store().records().unwrap().len(), 0);

        board.set_user(Some("ana".to_string()));
        assert!(board.report_game_over(40, 12));
        assert_eq!(board.best_score(), 40);

        let saved = &board.store().records().unwrap()[0];
        assert_eq!(saved.username, "ana");
        assert_eq!(saved.time_played, 12);
    }
}
