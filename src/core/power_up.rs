//! Power-up engine: at most one active modifier with a passive expiry.

use super::types::PowerUpKind;
use crate::constants::POWER_UP_DURATION_MS;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An active power-up and when it runs out (session-clock ms).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub expires_at_ms: u64,
}

/// Optional active power-up. No dedicated timer exists; expiry is checked
/// whenever the state is ticked or inspected.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PowerUpState {
    active: Option<ActivePowerUp>,
}

impl PowerUpState {
    /// Activate `kind`, replacing any existing power-up (no stacking).
    pub fn activate(&mut self, kind: PowerUpKind, now_ms: u64) {
        self.active = Some(ActivePowerUp {
            kind,
            expires_at_ms: now_ms + POWER_UP_DURATION_MS,
        });
    }

    /// Activate a uniformly random power-up.
    pub fn activate_random<R: Rng>(&mut self, rng: &mut R, now_ms: u64) -> PowerUpKind {
        let kind = PowerUpKind::ALL[rng.gen_range(0..PowerUpKind::ALL.len())];
        self.activate(kind, now_ms);
        kind
    }

    /// Drop the power-up if its expiry has passed. Must run at least once
    /// per movement step; calling it more often is harmless.
    pub fn expire_if_due(&mut self, now_ms: u64) {
        if let Some(active) = self.active {
            if now_ms > active.expires_at_ms {
                self.active = None;
            }
        }
    }

    pub fn active(&self) -> Option<ActivePowerUp> {
        self.active
    }

    pub fn kind(&self) -> Option<PowerUpKind> {
        self.active.map(|a| a.kind)
    }

    /// Tick-interval divisor; 1.0 when nothing is active.
    pub fn speed_multiplier(&self) -> f64 {
        self.active.map_or(1.0, |a| a.kind.speed_multiplier())
    }

    /// True while a DoublePoints power-up is running.
    pub fn double_points(&self) -> bool {
        matches!(self.kind(), Some(PowerUpKind::DoublePoints))
    }

    /// Milliseconds left before expiry; 0 when inactive or already due.
    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        self.active
            .map_or(0, |a| a.expires_at_ms.saturating_sub(now_ms))
    }
}
