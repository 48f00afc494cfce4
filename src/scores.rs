//! Score ledger: persisted list of finished-run scores plus the running
//! high score.
//!
//! The ledger is constructed in `main` and injected wherever it is
//! needed; nothing reads it through global state. Persistence failures
//! are swallowed so a broken save file never affects a running game.

use crate::constants::SCORE_HISTORY_LIMIT;
use crate::core::session::ScoreLedger;
use crate::persistence::{load_json_or_default, save_json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One finished run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: u32,
    /// ISO-8601 timestamp of when the run ended.
    pub date: String,
    pub id: Uuid,
}

/// Persisted ledger contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBook {
    pub high_score: u32,
    /// Most recent first, capped at [`SCORE_HISTORY_LIMIT`].
    pub scores: Vec<ScoreEntry>,
}

/// JSON-file-backed score ledger.
pub struct JsonScoreLedger {
    filename: String,
    book: ScoreBook,
}

impl JsonScoreLedger {
    pub const DEFAULT_FILE: &'static str = "scores.json";

    /// Load the ledger from ~/.viper/, starting empty if absent.
    pub fn load() -> Self {
        Self::load_from(Self::DEFAULT_FILE)
    }

    /// Load from an explicit file name (tests use a scratch file).
    pub fn load_from(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            book: load_json_or_default(filename),
        }
    }

    /// Add a finished run, newest first, and persist. Save errors are
    /// dropped; the in-memory book stays correct regardless.
    pub fn add_score(&mut self, score: u32) {
        let entry = ScoreEntry {
            score,
            date: Utc::now().to_rfc3339(),
            id: Uuid::new_v4(),
        };
        self.book.scores.insert(0, entry);
        self.book.scores.truncate(SCORE_HISTORY_LIMIT);
        self.book.high_score = self.book.high_score.max(score);
        save_json(&self.filename, &self.book).ok();
    }

    /// Wipe all recorded scores and the high score.
    pub fn clear(&mut self) {
        self.book = ScoreBook::default();
        save_json(&self.filename, &self.book).ok();
    }

    /// Recent scores, newest first.
    pub fn scores(&self) -> &[ScoreEntry] {
        &self.book.scores
    }
}

impl ScoreLedger for JsonScoreLedger {
    fn high_score(&self) -> u32 {
        self.book.high_score
    }

    fn commit_score(&mut self, score: u32) {
        self.add_score(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::save_path;
    use std::fs;

    fn scratch(name: &str) -> JsonScoreLedger {
        if let Ok(path) = save_path(name) {
            fs::remove_file(path).ok();
        }
        JsonScoreLedger::load_from(name)
    }

    fn cleanup(name: &str) {
        if let Ok(path) = save_path(name) {
            fs::remove_file(path).ok();
        }
    }

    #[test]
    fn test_empty_ledger() {
        let name = "scores_test_empty.json";
        let ledger = scratch(name);
        assert_eq!(ledger.high_score(), 0);
        assert!(ledger.scores().is_empty());
        cleanup(name);
    }

    #[test]
    fn test_add_score_updates_high_score() {
        let name = "scores_test_high.json";
        let mut ledger = scratch(name);

        ledger.add_score(10);
        ledger.add_score(25);
        ledger.add_score(7);

        assert_eq!(ledger.high_score(), 25);
        assert_eq!(ledger.scores().len(), 3);
        // Newest first
        assert_eq!(ledger.scores()[0].score, 7);
        assert_eq!(ledger.scores()[2].score, 10);
        cleanup(name);
    }

    #[test]
    fn test_history_is_capped() {
        let name = "scores_test_cap.json";
        let mut ledger = scratch(name);

        for i in 0..60 {
            ledger.add_score(i);
        }

        assert_eq!(ledger.scores().len(), SCORE_HISTORY_LIMIT);
        assert_eq!(ledger.scores()[0].score, 59);
        assert_eq!(ledger.high_score(), 59);
        cleanup(name);
    }

    #[test]
    fn test_persists_across_loads() {
        let name = "scores_test_persist.json";
        let mut ledger = scratch(name);
        ledger.add_score(42);

        let reloaded = JsonScoreLedger::load_from(name);
        assert_eq!(reloaded.high_score(), 42);
        assert_eq!(reloaded.scores().len(), 1);
        assert_eq!(reloaded.scores()[0].score, 42);
        cleanup(name);
    }

    #[test]
    fn test_clear_wipes_everything() {
        let name = "scores_test_clear.json";
        let mut ledger = scratch(name);
        ledger.add_score(42);
        ledger.clear();

        assert_eq!(ledger.high_score(), 0);
        assert!(ledger.scores().is_empty());

        let reloaded = JsonScoreLedger::load_from(name);
        assert_eq!(reloaded.high_score(), 0);
        cleanup(name);
    }
}
