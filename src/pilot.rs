use crate::direction::{Direction, direction_change_is_valid};
use crate::game::GameState;
use crate::snake::Position;

/// Picks the next direction for an unattended game.
///
/// Considers every legal turn from the applied direction, drops the ones that
/// would end the game, and heads for the food by Manhattan distance. Ties keep
/// the current direction, then follow [`Direction::ALL`] order. With no safe
/// move the current direction is returned unchanged.
#[must_use]
pub fn choose_direction(state: &GameState) -> Direction {
    let head = state.snake.head();
    let current = state.direction;

    let candidates = std::iter::once(current).chain(
        Direction::ALL
            .into_iter()
            .filter(|&direction| direction != current),
    );

    candidates
        .filter(|&direction| direction_change_is_valid(current, direction))
        .filter(|&direction| is_safe(state, head.step(direction)))
        .min_by_key(|&direction| {
            state
                .food
                .map_or(0, |food| head.step(direction).manhattan_distance(food))
        })
        .unwrap_or(current)
}

fn is_safe(state: &GameState, position: Position) -> bool {
    position.is_within_bounds(state.bounds()) && !state.snake.occupies(position)
}
