//! Persistent high-score list.
//!
//! A JSON array of at most ten scores, descending. Reading tolerates a
//! missing or corrupt file by starting empty; writing failures are for the
//! caller to ignore - the list is a nicety, never worth interrupting the
//! game over.

use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use tetrix_types::HIGH_SCORE_CAP;

/// Default score file, next to the working directory like a save file.
pub const SCORE_FILE: &str = "tetrix_scores.json";

/// Ordered list of past scores, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<u32>,
}

impl HighScores {
    /// Read the score file. Missing or unparsable files yield an empty list.
    pub fn load(path: impl AsRef<Path>) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|text| serde_json::from_str::<HighScores>(&text).ok())
            .map(|mut scores| {
                // A hand-edited file may be unsorted or overlong.
                scores.normalize();
                scores
            })
            .unwrap_or_default()
    }

    /// Insert a finished game's score, keeping order and the size cap.
    pub fn record(&mut self, score: u32) {
        self.entries.push(score);
        self.normalize();
    }

    fn normalize(&mut self) {
        self.entries.sort_unstable_by(|a, b| b.cmp(a));
        self.entries.truncate(HIGH_SCORE_CAP);
    }

    /// Rewrite the score file in full.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    pub fn entries(&self) -> &[u32] {
        &self.entries
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tetrix-test-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let scores = HighScores::load(temp_file("missing.json"));
        assert!(scores.entries().is_empty());
        assert_eq!(scores.best(), None);
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let path = temp_file("corrupt.json");
        fs::write(&path, "not json {").unwrap();

        let scores = HighScores::load(&path);
        assert!(scores.entries().is_empty());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_record_keeps_descending_order_and_cap() {
        let mut scores = HighScores::default();
        for score in [100, 900, 400, 50, 300, 800, 200, 700, 600, 500, 1000, 10] {
            scores.record(score);
        }

        assert_eq!(scores.entries().len(), HIGH_SCORE_CAP);
        assert_eq!(scores.best(), Some(1000));
        assert!(scores.entries().windows(2).all(|w| w[0] >= w[1]));
        // The two lowest fell off.
        assert!(!scores.entries().contains(&10));
        assert!(!scores.entries().contains(&50));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let path = temp_file("roundtrip.json");
        let mut scores = HighScores::default();
        scores.record(123);
        scores.record(456);
        scores.save(&path).unwrap();

        let loaded = HighScores::load(&path);
        assert_eq!(loaded, scores);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_load_normalizes_hand_edited_file() {
        let path = temp_file("edited.json");
        fs::write(&path, "[1,2,3,4,5,6,7,8,9,10,11,12]").unwrap();

        let loaded = HighScores::load(&path);
        assert_eq!(loaded.entries().len(), HIGH_SCORE_CAP);
        assert_eq!(loaded.best(), Some(12));

        let _ = fs::remove_file(path);
    }
}
