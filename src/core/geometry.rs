//! Collision, proximity, and food-placement utilities.
//!
//! Pure functions over [`Coordinate`]s; the session calls them each step.

use super::types::{Coordinate, GameBounds};
use rand::Rng;
use std::collections::VecDeque;

/// True if `point` falls outside the inclusive playable rectangle.
pub fn is_out_of_bounds(point: Coordinate, bounds: GameBounds) -> bool {
    point.x < bounds.x_min
        || point.x > bounds.x_max
        || point.y < bounds.y_min
        || point.y > bounds.y_max
}

/// True if `head` coincides with any body segment other than the head
/// itself (index 0).
pub fn is_self_collision(head: Coordinate, body: &VecDeque<Coordinate>) -> bool {
    body.iter().skip(1).any(|&seg| seg == head)
}

/// The sole terminal-condition check.
///
/// Evaluated against the head position *before* the move is applied,
/// using the pre-move body. A fatal move is therefore observed on the
/// step after it was made. Deliberately kept (see DESIGN.md).
pub fn is_game_over(head: Coordinate, bounds: GameBounds, body: &VecDeque<Coordinate>) -> bool {
    is_out_of_bounds(head, bounds) || is_self_collision(head, body)
}

/// True if the head is close enough to the food to eat it.
/// Uses Euclidean distance, strictly less than `tolerance`.
pub fn is_food_reached(head: Coordinate, food: Coordinate, tolerance: f64) -> bool {
    head.distance_to(food) < tolerance
}

/// Sample a food position within `[padding, max-padding]` on both axes,
/// clamped so it stays valid even on tiny grids.
///
/// Does NOT avoid the snake body; food can legally spawn under the snake
/// (documented behavior, see DESIGN.md).
pub fn random_food_position<R: Rng>(rng: &mut R, max_x: i32, max_y: i32, padding: i32) -> Coordinate {
    let span_x = (max_x - padding * 2).max(1);
    let span_y = (max_y - padding * 2).max(1);
    let x = rng.gen_range(0..span_x) + padding;
    let y = rng.gen_range(0..span_y) + padding;

    Coordinate {
        x: x.clamp(padding, (max_x - padding).max(padding)),
        y: y.clamp(padding, (max_y - padding).max(padding)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bounds() -> GameBounds {
        GameBounds::new(0, 30, 0, 50)
    }

    fn body(segs: &[(i32, i32)]) -> VecDeque<Coordinate> {
        segs.iter().map(|&(x, y)| Coordinate::new(x, y)).collect()
    }

    #[test]
    fn test_out_of_bounds_edges_are_inside() {
        let b = bounds();
        assert!(!is_out_of_bounds(Coordinate::new(0, 0), b));
        assert!(!is_out_of_bounds(Coordinate::new(30, 50), b));
        assert!(is_out_of_bounds(Coordinate::new(-1, 0), b));
        assert!(is_out_of_bounds(Coordinate::new(31, 0), b));
        assert!(is_out_of_bounds(Coordinate::new(0, -1), b));
        assert!(is_out_of_bounds(Coordinate::new(0, 51), b));
    }

    #[test]
    fn test_self_collision_skips_head() {
        let b = body(&[(5, 5), (4, 5), (3, 5)]);
        // Head equals itself at index 0 -- not a collision
        assert!(!is_self_collision(Coordinate::new(5, 5), &b));
        assert!(is_self_collision(Coordinate::new(4, 5), &b));
        assert!(is_self_collision(Coordinate::new(3, 5), &b));
        assert!(!is_self_collision(Coordinate::new(6, 5), &b));
    }

    #[test]
    fn test_self_collision_single_segment() {
        let b = body(&[(5, 5)]);
        assert!(!is_self_collision(Coordinate::new(5, 5), &b));
    }

    #[test]
    fn test_game_over_combines_checks() {
        let b = body(&[(5, 5), (4, 5)]);
        assert!(is_game_over(Coordinate::new(-1, 5), bounds(), &b));
        assert!(is_game_over(Coordinate::new(4, 5), bounds(), &b));
        assert!(!is_game_over(Coordinate::new(5, 5), bounds(), &b));
    }

    #[test]
    fn test_food_reached_tolerance() {
        let food = Coordinate::new(7, 5);
        assert!(is_food_reached(Coordinate::new(6, 5), food, 2.0));
        assert!(is_food_reached(Coordinate::new(7, 5), food, 2.0));
        // Distance exactly 2.0 is not within a strict tolerance
        assert!(!is_food_reached(Coordinate::new(5, 5), food, 2.0));
        assert!(!is_food_reached(Coordinate::new(4, 5), food, 2.0));
    }

    #[test]
    fn test_food_position_respects_padding() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let p = random_food_position(&mut rng, 30, 50, 2);
            assert!(p.x >= 2 && p.x <= 28, "x out of padded range: {}", p.x);
            assert!(p.y >= 2 && p.y <= 48, "y out of padded range: {}", p.y);
        }
    }

    #[test]
    fn test_food_position_tiny_grid_clamps() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            // Padding eats the whole grid; placement collapses to the
            // single clamped cell instead of going out of range.
            let p = random_food_position(&mut rng, 4, 3, 2);
            assert_eq!(p, Coordinate::new(2, 2));
        }
    }
}
