use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, warn};

use crate::game::RunSummary;

const MAGIC: &[u8; 4] = b"SAS1";
// 4 magic + 4 record count
const HEADER_SIZE: usize = 8;
// Each entry: 4 bytes score + 4 bytes kills
const ENTRY_SIZE: usize = 8;
const MAX_RECORDS: usize = 256;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunRecord {
    pub score: u32,
    pub kills: u32,
}

impl From<RunSummary> for RunRecord {
    fn from(summary: RunSummary) -> Self {
        RunRecord {
            score: summary.score,
            kills: summary.kills,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("not a score file")]
    BadMagic,
    #[error("score file truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
}

/// Where finished runs are kept.
pub trait ScoreStore {
    fn record_result(&mut self, score: u32, kills: u32) -> Result<(), ScoreError>;
    /// Best runs first: score descending, then kills descending.
    fn fetch_top_results(&self, limit: usize) -> Result<Vec<RunRecord>, ScoreError>;
}

/// Binary score file, by default next to the executable.
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> PathBuf {
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                return dir.join("space-attack.scores");
            }
        }
        PathBuf::from("space-attack.scores")
    }

    fn read_file(&self) -> Result<Vec<RunRecord>, ScoreError> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if data.len() < HEADER_SIZE {
            return Err(ScoreError::Truncated { expected: HEADER_SIZE, actual: data.len() });
        }
        if &data[0..4] != MAGIC {
            return Err(ScoreError::BadMagic);
        }

        let count = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;
        let expected = HEADER_SIZE + count * ENTRY_SIZE;
        if data.len() < expected {
            return Err(ScoreError::Truncated { expected, actual: data.len() });
        }

        let records = data[HEADER_SIZE..expected]
            .chunks_exact(ENTRY_SIZE)
            .map(|entry| RunRecord {
                score: u32::from_le_bytes([entry[0], entry[1], entry[2], entry[3]]),
                kills: u32::from_le_bytes([entry[4], entry[5], entry[6], entry[7]]),
            })
            .collect();
        Ok(records)
    }

    fn write_file(&self, records: &[RunRecord]) -> Result<(), ScoreError> {
        let mut buf = Vec::with_capacity(HEADER_SIZE + records.len() * ENTRY_SIZE);
        buf.extend_from_slice(MAGIC);
        buf.extend_from_slice(&(records.len() as u32).to_le_bytes());
        for record in records {
            buf.extend_from_slice(&record.score.to_le_bytes());
            buf.extend_from_slice(&record.kills.to_le_bytes());
        }
        fs::write(&self.path, &buf)?;
        Ok(())
    }
}

impl ScoreStore for FileScoreStore {
    fn record_result(&mut self, score: u32, kills: u32) -> Result<(), ScoreError> {
        let mut records = self.read_file()?;
        records.push(RunRecord { score, kills });
        sort_best_first(&mut records);
        records.truncate(MAX_RECORDS);
        self.write_file(&records)?;
        debug!(score, kills, path = %self.path.display(), "result recorded");
        Ok(())
    }

    fn fetch_top_results(&self, limit: usize) -> Result<Vec<RunRecord>, ScoreError> {
        let mut records = self.read_file()?;
        sort_best_first(&mut records);
        records.truncate(limit);
        Ok(records)
    }
}

fn sort_best_first(records: &mut [RunRecord]) {
    records.sort_by(|a, b| b.score.cmp(&a.score).then(b.kills.cmp(&a.kills)));
}

/// Persists a finished run; a failing store is logged and otherwise ignored.
pub fn record_best_effort(store: &mut dyn ScoreStore, summary: RunSummary) {
    if let Err(e) = store.record_result(summary.score, summary.kills) {
        warn!(error = %e, score = summary.score, kills = summary.kills, "could not record result");
    }
}

/// Leaderboard rows, or none when the store is unavailable.
pub fn leaderboard(store: &dyn ScoreStore, limit: usize) -> Vec<RunRecord> {
    store.fetch_top_results(limit).unwrap_or_else(|e| {
        warn!(error = %e, "leaderboard unavailable");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> FileScoreStore {
        FileScoreStore::new(dir.path().join("test.scores"))
    }

    #[test]
    fn missing_file_means_no_results() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.fetch_top_results(8).unwrap(), vec![]);
    }

    #[test]
    fn results_come_back_best_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        store.record_result(40, 2).unwrap();
        store.record_result(120, 6).unwrap();
        store.record_result(0, 0).unwrap();
        store.record_result(40, 3).unwrap();

        let top = store.fetch_top_results(3).unwrap();
        assert_eq!(
            top,
            vec![
                RunRecord { score: 120, kills: 6 },
                RunRecord { score: 40, kills: 3 },
                RunRecord { score: 40, kills: 2 },
            ]
        );

        // A second handle on the same file sees everything.
        assert_eq!(store_in(&dir).fetch_top_results(10).unwrap().len(), 4);
    }

    #[test]
    fn file_keeps_a_bounded_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&dir);
        for score in 0..(MAX_RECORDS as u32 + 10) {
            store.record_result(score, score / 20).unwrap();
        }
        let all = store.fetch_top_results(usize::MAX).unwrap();
        assert_eq!(all.len(), MAX_RECORDS);
        assert_eq!(all.last().unwrap().score, 10);
    }

    #[test]
    fn foreign_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.scores");
        fs::write(&path, b"RCS2 not ours").unwrap();
        let mut store = FileScoreStore::new(&path);

        assert!(matches!(store.fetch_top_results(8), Err(ScoreError::BadMagic)));
        assert!(matches!(store.record_result(20, 1), Err(ScoreError::BadMagic)));
        // Left untouched.
        assert_eq!(fs::read(&path).unwrap(), b"RCS2 not ours");
    }

    #[test]
    fn truncated_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.scores");
        let mut data = MAGIC.to_vec();
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&[0u8; ENTRY_SIZE]);
        fs::write(&path, &data).unwrap();

        let err = FileScoreStore::new(&path).fetch_top_results(8).unwrap_err();
        assert!(matches!(err, ScoreError::Truncated { expected: 32, actual: 16 }));
    }

    #[test]
    fn unavailable_store_degrades_to_no_data() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a file.
        let mut store = FileScoreStore::new(dir.path());

        record_best_effort(&mut store, RunSummary { score: 20, kills: 1 });
        assert!(leaderboard(&store, 8).is_empty());
    }
}
