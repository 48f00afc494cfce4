//! Player settings, persisted as JSON and passed explicitly to whoever
//! needs them (no global settings store).

use crate::persistence::{load_json_or_default, save_json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Gates the core's vibrate decisions.
    pub vibration: bool,
    /// Background music toggle (surfaced in the shell only).
    pub background_music: bool,
    /// Rounded play-field corners in the shell.
    pub round_edges: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            vibration: true,
            background_music: true,
            round_edges: false,
        }
    }
}

impl Settings {
    pub const DEFAULT_FILE: &'static str = "settings.json";

    /// Load from ~/.viper/, falling back to defaults.
    pub fn load() -> Self {
        load_json_or_default(Self::DEFAULT_FILE)
    }

    /// Persist the current values. Errors are dropped.
    pub fn save(&self) {
        save_json(Self::DEFAULT_FILE, self).ok();
    }

    pub fn toggle_vibration(&mut self) {
        self.vibration = !self.vibration;
        self.save();
    }
}
