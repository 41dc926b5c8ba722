//! CSV score store (`username,score,date,time_played`)

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use crate::scores::{ScoreRecord, ScoreStore, ScoreStoreError};

const HEADER: [&str; 4] = ["username", "score", "date", "time_played"];

#[derive(Debug, Clone)]
pub struct CsvScoreStore {
    path: PathBuf,
}

impl CsvScoreStore {
    /// Opens (or creates with a header row) the score file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScoreStoreError> {
        let path = path.as_ref().to_path_buf();
        let io_error = |source| ScoreStoreError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        if !path.exists() {
            let mut writer = csv::Writer::from_path(&path)?;
            writer.write_record(HEADER)?;
            writer.flush().map_err(io_error)?;
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for CsvScoreStore {
    fn records(&self) -> Result<Vec<ScoreRecord>, ScoreStoreError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize() {
            records.push(row?);
        }
        Ok(records)
    }

    fn append(&mut self, record: ScoreRecord) -> Result<(), ScoreStoreError> {
        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|source| ScoreStoreError::Io {
                path: self.path.clone(),
                source,
            })?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(&record)?;
        writer.flush().map_err(|source| ScoreStoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_writes_header_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data").join("scores.csv");

        CsvScoreStore::open(&path).unwrap();
        CsvScoreStore::open(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "username,score,date,time_played\n");
    }

    #[test]
    fn test_report_and_query_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        let mut store = CsvScoreStore::open(&path).unwrap();

        store.report_game_over("ana", 40, 35).unwrap();
        store.report_game_over("bo", 120, 80).unwrap();
        store.report_game_over("ana", 75, 50).unwrap();

        // Новый экземпляр читает тот же файл
        let reopened = CsvScoreStore::open(&path).unwrap();
        assert_eq!(reopened.best_score("ana").unwrap(), 75);
        assert_eq!(reopened.best_score("carl").unwrap(), 0);

        let top = reopened.global_highscores(1).unwrap();
        assert_eq!(top[0].username, "bo");

        let stats = reopened.user_stats("ana").unwrap();
        assert_eq!(stats.total_games, 2);
        assert_eq!(stats.total_time, 85);
    }

    #[test]
    fn test_malformed_row_is_csv_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scores.csv");
        fs::write(&path, "username,score,date,time_played\nana,lots,2024-01-01 00:00:00,3\n").unwrap();

        let store = CsvScoreStore::open(&path).unwrap();
        assert!(matches!(store.records(), Err(ScoreStoreError::Csv(_))));
    }
}
