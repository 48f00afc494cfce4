//! The game simulation core: pure, deterministic, UI-free.

pub mod combo;
pub mod difficulty;
pub mod geometry;
pub mod power_up;
pub mod session;
pub mod types;
