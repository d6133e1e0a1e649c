use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::config::GridSize;
use crate::snake::Position;

/// Picks a random cell that none of `occupied` covers.
///
/// Samples uniformly over the grid, rejecting occupied cells, for at most one
/// board's worth of attempts. When the budget runs out the first free cell in
/// row-major order is used instead. Returns `None` only when the board is full.
#[must_use]
pub fn spawn_food<'a, R, I>(rng: &mut R, bounds: GridSize, occupied: I) -> Option<Position>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Position>,
{
    let occupied: HashSet<Position> = occupied.into_iter().copied().collect();
    let max_attempts = bounds.total_cells();

    let covered = occupied
        .iter()
        .filter(|position| position.is_within_bounds(bounds))
        .count();
    if covered >= max_attempts {
        return None;
    }

    for _ in 0..max_attempts {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !occupied.contains(&candidate) {
            return Some(candidate);
        }
    }

    debug!(
        attempts = max_attempts,
        occupied = occupied.len(),
        "food sampling budget exhausted, scanning for a free cell"
    );
    first_free_cell(bounds, &occupied)
}

fn first_free_cell(bounds: GridSize, occupied: &HashSet<Position>) -> Option<Position> {
    (0..i32::from(bounds.height))
        .flat_map(|y| (0..i32::from(bounds.width)).map(move |x| Position { x, y }))
        .find(|position| !occupied.contains(position))
}
