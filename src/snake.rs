use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::config::{GridSize, INITIAL_SNAKE_LENGTH};
use crate::direction::Direction;
use crate::error::EmptySnakeError;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// The neighbouring cell one step in `direction`. May leave the grid.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub fn manhattan_distance(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Snake body, head first. Immutable between ticks; movement yields a new value.
///
/// Serialized as a plain list of segments; an empty list does not deserialize.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct Snake {
    body: VecDeque<Position>,
}

impl TryFrom<Vec<Position>> for Snake {
    type Error = EmptySnakeError;

    fn try_from(segments: Vec<Position>) -> Result<Self, Self::Error> {
        if segments.is_empty() {
            return Err(EmptySnakeError);
        }

        Ok(Self {
            body: VecDeque::from(segments),
        })
    }
}

impl From<Snake> for Vec<Position> {
    fn from(snake: Snake) -> Self {
        snake.body.into()
    }
}

impl Snake {
    /// Starting snake: head at `head`, remaining segments trailing to the left.
    #[must_use]
    pub fn initial(head: Position) -> Self {
        let body = (0..INITIAL_SNAKE_LENGTH)
            .map(|offset| Position {
                x: head.x - offset as i32,
                y: head.y,
            })
            .collect();

        Self { body }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>) -> Self {
        match Self::try_from(segments) {
            Ok(snake) => snake,
            Err(error) => panic!("{error}"),
        }
    }

    /// Body after moving the head to `next_head`. The tail is kept when `grow` is set.
    #[must_use]
    pub fn advanced(&self, next_head: Position, grow: bool) -> Self {
        let mut body = self.body.clone();
        body.push_front(next_head);
        if !grow {
            let _ = body.pop_back();
        }

        Self { body }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // Every constructor rejects an empty body and `advanced` pushes
        // before it pops.
        self.body[0]
    }

    #[must_use]
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; kept for the `len`/`is_empty` pairing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
