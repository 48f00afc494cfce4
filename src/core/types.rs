//! Core data types for the snake simulation.

use serde::{Deserialize, Serialize};

/// A position on the discrete play grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another coordinate, in grid units.
    pub fn distance_to(&self, other: Coordinate) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Cardinal direction for snake movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the (dx, dy) delta for this direction. Up decreases y.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// What the current food item does when eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodType {
    Normal,
    Golden,
    Rainbow,
    Poison,
}

impl FoodType {
    pub const ALL: [FoodType; 4] = [
        FoodType::Normal,
        FoodType::Golden,
        FoodType::Rainbow,
        FoodType::Poison,
    ];

    /// Base score increment before combo/power-up multipliers.
    /// Poison scores through its own penalty path, not this increment.
    pub fn base_score(&self) -> u32 {
        match self {
            Self::Normal => crate::constants::SCORE_INCREMENT,
            Self::Golden => crate::constants::GOLDEN_SCORE_INCREMENT,
            Self::Rainbow => crate::constants::RAINBOW_SCORE_INCREMENT,
            Self::Poison => 0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Golden => "Golden",
            Self::Rainbow => "Rainbow",
            Self::Poison => "Poison",
        }
    }
}

/// Kinds of temporary modifiers a pickup can activate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Slow,
    DoublePoints,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Speed,
        PowerUpKind::Slow,
        PowerUpKind::DoublePoints,
    ];

    /// Tick-interval divisor while this power-up is active.
    pub fn speed_multiplier(&self) -> f64 {
        match self {
            Self::Speed => 1.5,
            Self::Slow => 0.7,
            Self::DoublePoints => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Speed => "Speed",
            Self::Slow => "Slow",
            Self::DoublePoints => "2x Points",
        }
    }
}

/// Inclusive playable rectangle. Recomputed whenever the viewport changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameBounds {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl GameBounds {
    pub fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Bounds for a grid of `width` x `height` cells anchored at the origin.
    pub fn from_grid(width: i32, height: i32) -> Self {
        Self::new(0, width - 1, 0, height - 1)
    }

    pub fn width(&self) -> i32 {
        self.x_max - self.x_min + 1
    }

    pub fn height(&self) -> i32 {
        self.y_max - self.y_min + 1
    }

    /// Clamp a coordinate into the rectangle.
    pub fn clamp(&self, point: Coordinate) -> Coordinate {
        Coordinate::new(
            point.x.clamp(self.x_min, self.x_max),
            point.y.clamp(self.y_min, self.y_max),
        )
    }
}
