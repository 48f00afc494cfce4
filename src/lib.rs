//! Viper - Terminal Snake Arcade Library
//!
//! This module exposes the game simulation core and its collaborators
//! for testing and external use. The terminal UI lives in the binary.

pub mod build_info;
pub mod constants;
pub mod core;
pub mod input;
pub mod persistence;
pub mod scores;
pub mod settings;

pub use core::session::{GamePhase, GameSession, ScoreLedger, SessionConfig, TickSignals};
pub use core::types::{Coordinate, Direction, FoodType, GameBounds, PowerUpKind};
