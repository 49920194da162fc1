// Move geometry and the safety filter used by both the evaluator and the search
//
// Everything here is a pure function over coordinates. Out-of-range positions
// are not errors; they are simply reported as unsafe.

use crate::snapshot::SnakeAgent;
use crate::types::{Coord, Direction};

/// Head position after moving one step in `direction`
pub fn next_head(head: Coord, direction: Direction) -> Coord {
    direction.apply(&head)
}

/// Checks if a coordinate lies on a `width` x `height` board
pub fn is_within_bounds(p: Coord, width: i32, height: i32) -> bool {
    p.x >= 0 && p.x < width && p.y >= 0 && p.y < height
}

/// Checks if a coordinate collides with any snake body.
/// Tails are skipped since they move away on the next tick.
pub fn is_occupied_by_snake_body(p: Coord, snakes: &[SnakeAgent]) -> bool {
    snakes.iter().any(|snake| {
        let without_tail = snake.body.len().saturating_sub(1);
        snake.body[..without_tail].contains(&p)
    })
}

/// Directions from `head` that stay on the board and off every non-tail body
/// segment, in `Direction::all()` order.
pub fn safe_directions(
    head: Coord,
    snakes: &[SnakeAgent],
    width: i32,
    height: i32,
) -> Vec<Direction> {
    Direction::all()
        .iter()
        .filter(|&&dir| {
            let next = next_head(head, dir);
            is_within_bounds(next, width, height) && !is_occupied_by_snake_body(next, snakes)
        })
        .copied()
        .collect()
}
