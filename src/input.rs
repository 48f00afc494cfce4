//! Input classification: turns raw gesture deltas and key presses into
//! direction requests for the session.

use crate::core::types::Direction;
use crossterm::event::KeyCode;

/// Classify a swipe by its larger-magnitude axis; the sign picks the
/// direction. Returns `None` for a zero-length gesture. Positive y is
/// downward, matching grid coordinates.
pub fn classify_gesture(dx: f64, dy: f64) -> Option<Direction> {
    if dx == 0.0 && dy == 0.0 {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    }
}

/// Map arrow/WASD keys to a direction request. The terminal shell feeds
/// these through the same rejection path as gestures.
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') => Some(Direction::Right),
        _ => None,
    }
}
