//! Gameplay constants shared by the simulation core and the terminal shell.

use crate::core::types::Coordinate;

/// Starting snake body: a single segment.
pub const SNAKE_INITIAL_POSITION: Coordinate = Coordinate { x: 5, y: 5 };

/// Starting food position.
pub const FOOD_INITIAL_POSITION: Coordinate = Coordinate { x: 5, y: 20 };

/// Fallback movement interval when the score matches no table entry (ms).
pub const BASE_MOVE_INTERVAL_MS: u64 = 55;

/// Base score increments per food type.
pub const SCORE_INCREMENT: u32 = 1;
pub const GOLDEN_SCORE_INCREMENT: u32 = 3;
pub const RAINBOW_SCORE_INCREMENT: u32 = 5;

/// Score subtracted when poison food is eaten (clamped at zero).
pub const POISON_SCORE_PENALTY: u32 = 5;

/// Segments removed from the tail on a poison pickup (length floor is 1).
pub const POISON_SHRINK_SEGMENTS: usize = 2;

/// How long the poison screen tint stays active (session-clock ms).
pub const POISON_EFFECT_MS: u64 = 1000;

/// Consecutive pickups needed before the combo multiplier kicks in.
pub const COMBO_THRESHOLD: u32 = 3;

/// Maximum gap between pickups that still extends a combo (ms).
pub const COMBO_TIMEOUT_MS: u64 = 2000;

/// Combo multiplier cap.
pub const COMBO_MULTIPLIER_CAP: u32 = 5;

/// How long an activated power-up lasts (ms).
pub const POWER_UP_DURATION_MS: u64 = 5000;

/// Head-to-food distance (Euclidean, grid units) that counts as a pickup.
pub const FOOD_TOLERANCE: f64 = 2.0;

/// Cells kept clear between spawned food and the play-field edge.
pub const FOOD_PADDING: i32 = 2;

/// Probability bands for the post-pickup roll: `r < POWER_UP_CHANCE`
/// activates a random power-up, `r < SPECIAL_FOOD_CHANCE` re-rolls the
/// food type, anything else reverts to normal food.
pub const POWER_UP_CHANCE: f64 = 0.10;
pub const SPECIAL_FOOD_CHANCE: f64 = 0.30;

// ── Vibration patterns (ms). The core emits the decision; the shell
// decides how to surface it. ─────────────────────────────────────────
pub const VIBRATE_FOOD_MS: u32 = 25;
pub const VIBRATE_POISON_MS: u32 = 100;
pub const VIBRATE_GAME_OVER_MS: u32 = 300;

/// Largest `dt` a single tick call will integrate (ms). Prevents a step
/// avalanche after the terminal was suspended.
pub const MAX_TICK_DT_MS: u64 = 500;

/// Most recent score entries kept in the ledger.
pub const SCORE_HISTORY_LIMIT: usize = 50;
