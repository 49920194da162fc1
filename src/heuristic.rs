// Static evaluation of a snapshot
//
// The score is always from our own snake's point of view, regardless of which
// ply produced the snapshot:
//
//   safe_move_weight * safe_moves
//     + food_weight * (1 / nearest_food_distance)
//     + own_body_penalty * (head overlaps own body)

use crate::config::ScoresConfig;
use crate::geometry::safe_directions;
use crate::snapshot::Snapshot;

/// Breakdown of a single evaluation, mostly useful for logging and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub safe_move_count: usize,
    pub on_own_body: bool,
    /// None when the board has no food
    pub min_food_distance: Option<f64>,
    pub score: f64,
}

/// Number of safe moves our snake has from its current head
pub fn safe_move_count(snapshot: &Snapshot) -> usize {
    let me = snapshot.own_snake();
    safe_directions(me.head, snapshot.snakes(), snapshot.width, snapshot.height).len()
}

/// True if our head shares a tile with another segment of our own body
pub fn on_own_body(snapshot: &Snapshot) -> bool {
    let me = snapshot.own_snake();
    me.body.iter().skip(1).any(|segment| *segment == me.head)
}

/// Euclidean distance from our head to the closest food, if any
pub fn min_food_distance(snapshot: &Snapshot) -> Option<f64> {
    let head = snapshot.own_snake().head;
    snapshot
        .food
        .iter()
        .map(|food| head.euclidean_distance(food))
        .min_by(|a, b| a.total_cmp(b))
}

/// Reciprocal food term. Distance 0 is replaced by the configured substitute;
/// no food on the board contributes nothing.
pub fn food_term(distance: Option<f64>, scores: &ScoresConfig) -> f64 {
    match distance {
        None => 0.0,
        Some(d) if d == 0.0 => 1.0 / scores.zero_distance_substitute,
        Some(d) => 1.0 / d,
    }
}

pub fn evaluate_detailed(snapshot: &Snapshot, scores: &ScoresConfig) -> Evaluation {
    let safe_move_count = safe_move_count(snapshot);
    let on_own_body = on_own_body(snapshot);
    let min_food_distance = min_food_distance(snapshot);

    let mut score = scores.safe_move_weight * safe_move_count as f64
        + scores.food_weight * food_term(min_food_distance, scores);
    if on_own_body {
        score += scores.own_body_penalty;
    }

    Evaluation {
        safe_move_count,
        on_own_body,
        min_food_distance,
        score,
    }
}

/// Heuristic value of `snapshot` for our own snake; higher is better
pub fn evaluate(snapshot: &Snapshot, scores: &ScoresConfig) -> f64 {
    evaluate_detailed(snapshot, scores).score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::snapshot::SnakeAgent;
    use crate::types::Coord;

    fn coords(points: &[(i32, i32)]) -> Vec<Coord> {
        points.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    fn solo(body: &[(i32, i32)], food: &[(i32, i32)]) -> Snapshot {
        Snapshot::new(
            11,
            11,
            coords(food),
            vec![SnakeAgent::new("me", coords(body))],
            "me",
        )
        .unwrap()
    }

    fn scores() -> ScoresConfig {
        Config::default_hardcoded().scores
    }

    #[test]
    fn test_open_board_no_food() {
        let snapshot = solo(&[(5, 5)], &[]);
        let eval = evaluate_detailed(&snapshot, &scores());
        assert_eq!(eval.safe_move_count, 4);
        assert!(!eval.on_own_body);
        assert_eq!(eval.min_food_distance, None);
        assert_eq!(eval.score, 8.0);
    }

    #[test]
    fn test_food_term_uses_nearest_food() {
        let snapshot = solo(&[(5, 5)], &[(5, 7), (0, 0)]);
        // 2 * 4 + 2 * (1 / 2)
        assert_eq!(evaluate(&snapshot, &scores()), 9.0);
    }

    #[test]
    fn test_food_under_head_uses_substitute() {
        let snapshot = solo(&[(5, 5)], &[(5, 5)]);
        let eval = evaluate_detailed(&snapshot, &scores());
        assert_eq!(eval.min_food_distance, Some(0.0));
        // 2 * 4 + 2 * (1 / 0.5)
        assert_eq!(eval.score, 12.0);
    }

    #[test]
    fn test_food_term_grows_as_food_gets_closer() {
        let s = scores();
        let far = food_term(Some(4.0), &s);
        let near = food_term(Some(1.0), &s);
        let nearer = food_term(Some(0.01), &s);
        assert!(far < near && near < nearer);
        assert_eq!(food_term(Some(0.0), &s), 2.0);
        assert_eq!(food_term(None, &s), 0.0);
    }

    #[test]
    fn test_stacked_body_costs_exactly_ten() {
        let clear = solo(&[(5, 5), (5, 4), (5, 3)], &[]);
        // Start-of-game stacking: head shares its tile with the next segment
        let stacked = solo(&[(5, 5), (5, 5), (5, 4)], &[]);

        let clear_eval = evaluate_detailed(&clear, &scores());
        let stacked_eval = evaluate_detailed(&stacked, &scores());

        assert!(!clear_eval.on_own_body);
        assert!(stacked_eval.on_own_body);
        assert_eq!(clear_eval.safe_move_count, 3);
        assert_eq!(stacked_eval.safe_move_count, 4);
        assert_eq!(
            stacked_eval.score,
            2.0 * stacked_eval.safe_move_count as f64 - 10.0
        );
    }

    #[test]
    fn test_more_safe_moves_never_scores_lower() {
        let s = scores();
        // Corner: 2 moves, edge: 3 moves, centre: 4 moves
        let corner = evaluate(&solo(&[(0, 0)], &[]), &s);
        let edge = evaluate(&solo(&[(0, 5)], &[]), &s);
        let centre = evaluate(&solo(&[(5, 5)], &[]), &s);
        assert!(corner <= edge && edge <= centre);
        assert_eq!(centre - edge, 2.0);
    }

    #[test]
    fn test_score_is_from_own_perspective() {
        let snapshot = Snapshot::new(
            11,
            11,
            vec![],
            vec![
                SnakeAgent::new("them", coords(&[(6, 5), (7, 5), (8, 5)])),
                SnakeAgent::new("me", coords(&[(5, 5)])),
            ],
            "me",
        )
        .unwrap();
        // Right is blocked by the opponent's head
        assert_eq!(safe_move_count(&snapshot), 3);
        assert_eq!(evaluate(&snapshot, &scores()), 6.0);
    }
}
