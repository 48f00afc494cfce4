//! Difficulty controller: maps cumulative score to the movement interval.

use crate::constants::BASE_MOVE_INTERVAL_MS;
use serde::{Deserialize, Serialize};

/// One difficulty step: reached at `score_threshold`, ticks every
/// `interval_ms` thereafter (before the power-up speed multiplier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyLevel {
    pub score_threshold: u32,
    pub interval_ms: u64,
}

/// Default progression: faster ticks as the score climbs.
pub const DEFAULT_DIFFICULTY_LEVELS: [DifficultyLevel; 4] = [
    DifficultyLevel {
        score_threshold: 0,
        interval_ms: 55,
    },
    DifficultyLevel {
        score_threshold: 20,
        interval_ms: 45,
    },
    DifficultyLevel {
        score_threshold: 50,
        interval_ms: 35,
    },
    DifficultyLevel {
        score_threshold: 100,
        interval_ms: 25,
    },
];

/// Ascending threshold table. Thresholds must be strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTable {
    levels: Vec<DifficultyLevel>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            levels: DEFAULT_DIFFICULTY_LEVELS.to_vec(),
        }
    }
}

impl DifficultyTable {
    pub fn new(levels: Vec<DifficultyLevel>) -> Self {
        debug_assert!(
            levels.windows(2).all(|w| w[0].score_threshold < w[1].score_threshold),
            "difficulty thresholds must ascend"
        );
        Self { levels }
    }

    /// Highest entry whose threshold is at or below `score`.
    fn matched_index(&self, score: u32) -> Option<usize> {
        self.levels
            .iter()
            .rposition(|level| score >= level.score_threshold)
    }

    /// 1-based difficulty level for display. Level 1 when nothing matches.
    pub fn current_level(&self, score: u32) -> usize {
        self.matched_index(score).map_or(0, |i| i + 1).max(1)
    }

    /// Base movement interval for `score`, before the speed multiplier.
    pub fn base_interval_ms(&self, score: u32) -> u64 {
        self.matched_index(score)
            .map_or(BASE_MOVE_INTERVAL_MS, |i| self.levels[i].interval_ms)
    }

    /// Power-up-adjusted movement interval, floored at 1 ms.
    pub fn effective_interval_ms(&self, score: u32, speed_multiplier: f64) -> u64 {
        let base = self.base_interval_ms(score) as f64;
        ((base / speed_multiplier) as u64).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_intervals() {
        let table = DifficultyTable::default();
        let expected = [
            (0, 55),
            (19, 55),
            (20, 45),
            (49, 45),
            (50, 35),
            (99, 35),
            (100, 25),
            (150, 25),
        ];
        for (score, interval) in expected {
            assert_eq!(
                table.base_interval_ms(score),
                interval,
                "score {} should map to {}ms",
                score,
                interval
            );
        }
    }

    #[test]
    fn test_level_index_is_one_based() {
        let table = DifficultyTable::default();
        assert_eq!(table.current_level(0), 1);
        assert_eq!(table.current_level(19), 1);
        assert_eq!(table.current_level(20), 2);
        assert_eq!(table.current_level(50), 3);
        assert_eq!(table.current_level(500), 4);
    }

    #[test]
    fn test_empty_table_falls_back_to_base_interval() {
        let table = DifficultyTable::new(Vec::new());
        assert_eq!(table.base_interval_ms(42), BASE_MOVE_INTERVAL_MS);
        assert_eq!(table.current_level(42), 1);
    }

    #[test]
    fn test_speed_multiplier_divides_interval() {
        let table = DifficultyTable::default();
        // Speed power-up: 55 / 1.5 = 36.67 -> 36
        assert_eq!(table.effective_interval_ms(0, 1.5), 36);
        // Slow power-up: 55 / 0.7 = 78.57 -> 78
        assert_eq!(table.effective_interval_ms(0, 0.7), 78);
        assert_eq!(table.effective_interval_ms(0, 1.0), 55);
    }
}
