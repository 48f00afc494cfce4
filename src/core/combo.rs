//! Combo engine: consecutive-pickup tracking and the score multiplier it
//! produces.

use crate::constants::{COMBO_MULTIPLIER_CAP, COMBO_THRESHOLD, COMBO_TIMEOUT_MS};
use serde::{Deserialize, Serialize};

/// Tracks consecutive in-time food pickups on the session clock.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ComboState {
    /// Current combo count. 0 means no combo in progress.
    pub count: u32,
    /// Session-clock timestamp of the last non-poison pickup (ms).
    pub last_pickup_ms: u64,
}

impl ComboState {
    /// Register a non-poison pickup at `now_ms`.
    ///
    /// Within the timeout window the combo extends; otherwise it restarts
    /// at 1 (not 0 -- the pickup itself opens a new chain). Returns true
    /// when the resulting combo is at or past the flash threshold.
    pub fn register_pickup(&mut self, now_ms: u64) -> bool {
        if now_ms.saturating_sub(self.last_pickup_ms) < COMBO_TIMEOUT_MS {
            self.count += 1;
        } else {
            self.count = 1;
        }
        self.last_pickup_ms = now_ms;
        self.is_hot()
    }

    /// Poison pickup: the chain dies outright. The pickup stamp is left
    /// untouched, so a quick follow-up pickup still compares against the
    /// pre-poison time (kept behavior, see DESIGN.md).
    pub fn reset(&mut self) {
        self.count = 0;
    }

    /// True once the combo is big enough to multiply scores and flash.
    pub fn is_hot(&self) -> bool {
        self.count >= COMBO_THRESHOLD
    }

    /// Score multiplier contributed by the combo, capped.
    pub fn multiplier(&self) -> u32 {
        if self.is_hot() {
            self.count.min(COMBO_MULTIPLIER_CAP)
        } else {
            1
        }
    }
}
