// Search-side board representation
//
// A Snapshot is the world as the search sees it: dimensions, food and the
// body of every snake. Snapshots are values. `apply_move` always returns a new
// one, so sibling branches of the search tree can never observe each other.

use std::collections::{HashMap, HashSet};

use crate::error::SnakeError;
use crate::types::{Board, Coord};

/// One snake as tracked by the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeAgent {
    pub id: String,
    /// Head first, tail last
    pub body: Vec<Coord>,
    pub head: Coord,
}

impl SnakeAgent {
    /// Builds an agent whose head is the first body segment.
    /// An empty body is kept as-is with the head at the origin.
    pub fn new(id: impl Into<String>, body: Vec<Coord>) -> Self {
        let head = body.first().copied().unwrap_or(Coord { x: 0, y: 0 });
        SnakeAgent {
            id: id.into(),
            body,
            head,
        }
    }

    /// Same snake one step later: `new_head` in front, tail dropped.
    /// A snake with no body has nothing to move and is returned unchanged.
    pub fn advanced(&self, new_head: Coord) -> Self {
        if self.body.is_empty() {
            return self.clone();
        }

        let mut body = Vec::with_capacity(self.body.len());
        body.push(new_head);
        body.extend_from_slice(&self.body[..self.body.len().saturating_sub(1)]);
        SnakeAgent {
            id: self.id.clone(),
            body,
            head: new_head,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub food: HashSet<Coord>,
    snakes: Vec<SnakeAgent>,
    index: HashMap<String, usize>,
    own_id: String,
}

impl Snapshot {
    /// Builds a snapshot from explicit parts.
    /// Fails with `MissingAgent` if `own_id` is not one of `snakes`.
    pub fn new(
        width: i32,
        height: i32,
        food: impl IntoIterator<Item = Coord>,
        snakes: Vec<SnakeAgent>,
        own_id: impl Into<String>,
    ) -> Result<Self, SnakeError> {
        let own_id = own_id.into();
        let index: HashMap<String, usize> = snakes
            .iter()
            .enumerate()
            .map(|(i, s)| (s.id.clone(), i))
            .collect();

        if !index.contains_key(&own_id) {
            return Err(SnakeError::MissingAgent(own_id));
        }

        Ok(Snapshot {
            width,
            height,
            food: food.into_iter().collect(),
            snakes,
            index,
            own_id,
        })
    }

    /// Builds the root snapshot for a turn from the wire board.
    /// The head is taken from the body so the head == body[0] invariant holds.
    pub fn from_board(board: &Board, own_id: &str) -> Result<Self, SnakeError> {
        let snakes = board
            .snakes
            .iter()
            .map(|s| SnakeAgent::new(s.id.clone(), s.body.clone()))
            .collect();

        Self::new(
            board.width,
            board.height,
            board.food.iter().copied(),
            snakes,
            own_id,
        )
    }

    pub fn own_id(&self) -> &str {
        &self.own_id
    }

    /// Our own snake. Presence is checked at construction.
    pub fn own_snake(&self) -> &SnakeAgent {
        &self.snakes[self.index[&self.own_id]]
    }

    pub fn snake(&self, id: &str) -> Option<&SnakeAgent> {
        self.index.get(id).map(|&i| &self.snakes[i])
    }

    /// All snakes in wire order
    pub fn snakes(&self) -> &[SnakeAgent] {
        &self.snakes
    }

    /// Ids of every snake but ours, in wire order
    pub fn opponent_ids(&self) -> Vec<String> {
        self.snakes
            .iter()
            .filter(|s| s.id != self.own_id)
            .map(|s| s.id.clone())
            .collect()
    }

    pub fn has_food_at(&self, p: &Coord) -> bool {
        self.food.contains(p)
    }

    /// New snapshot in which `agent_id` has moved its head to `new_head`.
    /// Body length is unchanged and food is never consumed. Nothing is
    /// validated here; an unknown id yields an unchanged copy.
    pub fn apply_move(&self, agent_id: &str, new_head: Coord) -> Snapshot {
        let mut next = self.clone();
        if let Some(&i) = self.index.get(agent_id) {
            next.snakes[i] = self.snakes[i].advanced(new_head);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::next_head;
    use crate::types::{Battlesnake, Direction};

    fn coords(points: &[(i32, i32)]) -> Vec<Coord> {
        points.iter().map(|&(x, y)| Coord::new(x, y)).collect()
    }

    fn two_snake_snapshot() -> Snapshot {
        Snapshot::new(
            11,
            11,
            coords(&[(0, 0), (9, 9)]),
            vec![
                SnakeAgent::new("me", coords(&[(5, 5), (5, 4), (5, 3)])),
                SnakeAgent::new("them", coords(&[(2, 2), (2, 1), (2, 0)])),
            ],
            "me",
        )
        .unwrap()
    }

    #[test]
    fn test_missing_agent_is_rejected() {
        let result = Snapshot::new(
            11,
            11,
            vec![],
            vec![SnakeAgent::new("them", coords(&[(1, 1)]))],
            "me",
        );
        assert!(matches!(result, Err(SnakeError::MissingAgent(id)) if id == "me"));
    }

    #[test]
    fn test_from_board_uses_body_for_head() {
        let board = Board {
            height: 7,
            width: 9,
            food: coords(&[(1, 1)]),
            snakes: vec![Battlesnake {
                id: "me".to_string(),
                name: "Rusty".to_string(),
                health: 90,
                body: coords(&[(3, 3), (3, 2)]),
                head: Coord::new(3, 3),
                length: 2,
                latency: "0".to_string(),
                shout: None,
            }],
            hazards: vec![],
        };

        let snapshot = Snapshot::from_board(&board, "me").unwrap();
        assert_eq!(snapshot.width, 9);
        assert_eq!(snapshot.height, 7);
        assert_eq!(snapshot.own_snake().head, Coord::new(3, 3));
        assert!(snapshot.has_food_at(&Coord::new(1, 1)));
        assert!(Snapshot::from_board(&board, "ghost").is_err());
    }

    #[test]
    fn test_apply_move_shifts_body() {
        let snapshot = two_snake_snapshot();
        let moved = snapshot.apply_move("me", Coord::new(6, 5));

        let me = moved.own_snake();
        assert_eq!(me.head, Coord::new(6, 5));
        assert_eq!(me.body, coords(&[(6, 5), (5, 5), (5, 4)]));
        assert_eq!(me.body[0], me.head);
    }

    #[test]
    fn test_apply_move_leaves_everything_else_untouched() {
        let snapshot = two_snake_snapshot();
        let moved = snapshot.apply_move("me", Coord::new(5, 6));

        assert_eq!(moved.snake("them"), snapshot.snake("them"));
        assert_eq!(moved.food, snapshot.food);
        assert_eq!(moved.own_snake().body.len(), 3);

        // The parent is not modified
        assert_eq!(snapshot.own_snake().head, Coord::new(5, 5));
    }

    #[test]
    fn test_apply_move_twice_advances_two_steps() {
        let snapshot = two_snake_snapshot();
        let once = snapshot.apply_move("me", next_head(snapshot.own_snake().head, Direction::Up));
        let twice = once.apply_move("me", next_head(once.own_snake().head, Direction::Up));

        assert_eq!(twice.own_snake().head, Coord::new(5, 7));
        assert_eq!(twice.own_snake().body, coords(&[(5, 7), (5, 6), (5, 5)]));
    }

    #[test]
    fn test_apply_move_does_not_eat() {
        let snapshot = two_snake_snapshot();
        let moved = snapshot.apply_move("them", Coord::new(9, 9));
        assert!(moved.has_food_at(&Coord::new(9, 9)));
        assert_eq!(moved.snake("them").unwrap().body.len(), 3);
    }

    #[test]
    fn test_empty_body_does_not_grow() {
        let ghost = SnakeAgent::new("ghost", vec![]);
        let moved = ghost.advanced(Coord::new(3, 3));
        assert_eq!(moved, ghost);
        assert!(moved.body.is_empty());

        let snapshot = Snapshot::new(11, 11, vec![], vec![ghost], "ghost").unwrap();
        let moved = snapshot.apply_move("ghost", Coord::new(3, 3));
        assert_eq!(moved.own_snake().body.len(), 0);
    }

    #[test]
    fn test_apply_move_unknown_id_is_noop() {
        let snapshot = two_snake_snapshot();
        let moved = snapshot.apply_move("ghost", Coord::new(0, 0));
        assert_eq!(moved.snakes(), snapshot.snakes());
    }

    #[test]
    fn test_opponent_ids_keep_wire_order() {
        let snapshot = Snapshot::new(
            11,
            11,
            vec![],
            vec![
                SnakeAgent::new("b", coords(&[(1, 1)])),
                SnakeAgent::new("me", coords(&[(5, 5)])),
                SnakeAgent::new("a", coords(&[(9, 9)])),
            ],
            "me",
        )
        .unwrap();

        assert_eq!(snapshot.opponent_ids(), vec!["b".to_string(), "a".to_string()]);
    }
}
