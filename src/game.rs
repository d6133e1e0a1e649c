use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::GridSize;
use crate::direction::{Direction, direction_change_is_valid};
use crate::food::spawn_food;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state, derived from the state flags.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell; no food can be placed.
    BoardFull,
}

/// Snapshot of one game at a point in time.
///
/// Ticks never mutate a state in place: [`step_state`] returns the next
/// snapshot. Only the pending direction and the pause flag change in place,
/// on behalf of the input side.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub snake: Snake,
    /// Direction applied on the most recent tick.
    pub direction: Direction,
    /// Direction queued for the next tick.
    pub next_direction: Direction,
    pub food: Option<Position>,
    pub score: u32,
    pub game_over: bool,
    pub paused: bool,
    pub outcome: Option<GameOutcome>,
    bounds: GridSize,
}

/// Builds the opening state: three segments moving right, food on a free cell.
#[must_use]
pub fn create_initial_state<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize) -> GameState {
    let head = initial_head(bounds);
    let snake = Snake::initial(head);
    let food = spawn_food(rng, bounds, snake.segments());

    debug!(?head, ?food, width = bounds.width, height = bounds.height, "new game");

    GameState {
        snake,
        direction: Direction::Right,
        next_direction: Direction::Right,
        food,
        score: 0,
        game_over: false,
        paused: false,
        outcome: None,
        bounds,
    }
}

/// Head cell of the starting snake; `(8, 10)` on the default 20x20 board.
#[must_use]
pub fn initial_head(bounds: GridSize) -> Position {
    Position {
        x: (i32::from(bounds.width) * 2 / 5).max(2),
        y: i32::from(bounds.height / 2),
    }
}

/// Computes the state one tick after `state`.
///
/// Game-over and paused states come back unchanged. A move into a wall or
/// into any current segment ends the game with the pre-move body kept.
#[must_use]
pub fn step_state<R: Rng + ?Sized>(state: &GameState, rng: &mut R) -> GameState {
    if state.game_over || state.paused {
        return state.clone();
    }

    let direction = state.next_direction;
    let next_head = state.snake.head().step(direction);

    if !next_head.is_within_bounds(state.bounds) {
        return state.ended(GameOutcome::WallCollision);
    }

    // Checked against the body before it moves, tail included.
    if state.snake.occupies(next_head) {
        return state.ended(GameOutcome::SelfCollision);
    }

    let ate_food = state.food == Some(next_head);
    let snake = state.snake.advanced(next_head, ate_food);

    let food = if ate_food {
        spawn_food(rng, state.bounds, snake.segments())
    } else {
        state.food
    };
    let board_full = food.is_none();

    trace!(?next_head, ?direction, ate_food, "tick");

    let mut next = GameState {
        snake,
        direction,
        next_direction: direction,
        food,
        score: state.score + u32::from(ate_food),
        game_over: false,
        paused: false,
        outcome: None,
        bounds: state.bounds,
    };

    if board_full {
        debug!(score = next.score, length = next.snake.len(), "board full");
        next.game_over = true;
        next.outcome = Some(GameOutcome::BoardFull);
    }

    next
}

impl GameState {
    /// Queues `direction` for the next tick unless it reverses the applied direction.
    ///
    /// Returns whether the request was accepted. Later requests overwrite
    /// earlier ones; only one direction is queued.
    pub fn request_direction_change(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.next_direction = direction;
        true
    }

    /// Like [`Self::request_direction_change`] but takes a direction name.
    ///
    /// Unknown names are ignored.
    pub fn request_direction_change_named(&mut self, name: &str) -> bool {
        match name.parse::<Direction>() {
            Ok(direction) => self.request_direction_change(direction),
            Err(_) => false,
        }
    }

    /// Flips the pause flag; nothing else changes.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Convenience wrapper around [`step_state`].
    #[must_use]
    pub fn step<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        step_state(self, rng)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Playing
        }
    }

    /// True for an untouched opening state: starting body, still heading right, nothing eaten.
    #[must_use]
    pub fn is_start_screen(&self) -> bool {
        !self.game_over
            && self.score == 0
            && self.direction == Direction::Right
            && self.next_direction == Direction::Right
            && self.snake == Snake::initial(initial_head(self.bounds))
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Places the snake explicitly, keeping all other fields.
    #[must_use]
    pub fn with_snake(mut self, snake: Snake, direction: Direction) -> Self {
        self.snake = snake;
        self.direction = direction;
        self.next_direction = direction;
        self
    }

    #[must_use]
    pub fn with_food(mut self, food: Option<Position>) -> Self {
        self.food = food;
        self
    }

    fn ended(&self, outcome: GameOutcome) -> Self {
        debug!(?outcome, score = self.score, "game over");
        Self {
            game_over: true,
            outcome: Some(outcome),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{GameOutcome, GameState, GameStatus, create_initial_state, step_state};
    use crate::config::GridSize;
    use crate::direction::Direction;
    use crate::snake::{Position, Snake};

    fn fresh(seed: u64) -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = create_initial_state(&mut rng, GridSize::default());
        (state, rng)
    }

    fn segments(state: &GameState) -> Vec<Position> {
        state.snake.segments().copied().collect()
    }

    #[test]
    fn initial_state_matches_opening_layout() {
        let (state, _) = fresh(1);

        assert_eq!(
            segments(&state),
            vec![
                Position::new(8, 10),
                Position::new(7, 10),
                Position::new(6, 10)
            ]
        );
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.next_direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert!(!state.paused);
        assert_eq!(state.status(), GameStatus::Playing);
        assert!(state.is_start_screen());

        let food = state.food.expect("fresh board has room for food");
        assert!(!state.snake.occupies(food));
    }

    #[test]
    fn eating_food_grows_snake_and_scores() {
        let (state, mut rng) = fresh(2);
        let state = state.with_food(Some(Position::new(9, 10)));

        let next = step_state(&state, &mut rng);

        assert_eq!(
            segments(&next),
            vec![
                Position::new(9, 10),
                Position::new(8, 10),
                Position::new(7, 10),
                Position::new(6, 10)
            ]
        );
        assert_eq!(next.score, 1);
        assert!(!next.game_over);
        let food = next.food.expect("food respawned");
        assert_ne!(food, Position::new(9, 10));
        assert!(!next.snake.occupies(food));
    }

    #[test]
    fn plain_move_keeps_length_and_food() {
        let (state, mut rng) = fresh(3);
        let state = state.with_food(Some(Position::new(0, 0)));

        let next = step_state(&state, &mut rng);

        assert_eq!(next.snake.len(), 3);
        assert_eq!(next.snake.head(), Position::new(9, 10));
        assert_eq!(next.food, Some(Position::new(0, 0)));
        assert_eq!(next.score, 0);
    }

    #[test]
    fn wall_collision_keeps_pre_move_body() {
        let (state, mut rng) = fresh(4);
        let snake = Snake::from_segments(vec![
            Position::new(19, 10),
            Position::new(18, 10),
            Position::new(17, 10),
        ]);
        let state = state.with_snake(snake.clone(), Direction::Right);

        let next = step_state(&state, &mut rng);

        assert!(next.game_over);
        assert_eq!(next.outcome, Some(GameOutcome::WallCollision));
        assert_eq!(next.snake, snake);
        assert_eq!(next.score, state.score);
        assert_eq!(next.food, state.food);
        assert_eq!(next.status(), GameStatus::GameOver);
    }

    #[test]
    fn self_collision_ends_game_even_next_to_food() {
        let (state, mut rng) = fresh(5);
        // Turning down from (5,5) lands on the fourth segment.
        let snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(6, 5),
            Position::new(6, 6),
            Position::new(5, 6),
            Position::new(4, 6),
        ]);
        let mut state = state
            .with_snake(snake.clone(), Direction::Left)
            .with_food(Some(Position::new(4, 5)));
        assert!(state.request_direction_change(Direction::Down));

        let next = step_state(&state, &mut rng);

        assert!(next.game_over);
        assert_eq!(next.outcome, Some(GameOutcome::SelfCollision));
        assert_eq!(next.snake, snake);
        assert_eq!(next.direction, Direction::Left);
    }

    #[test]
    fn moving_into_current_tail_counts_as_collision() {
        let (state, mut rng) = fresh(6);
        let snake = Snake::from_segments(vec![
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ]);
        let state = state.with_snake(snake, Direction::Right);

        let next = step_state(&state, &mut rng);

        assert_eq!(next.outcome, Some(GameOutcome::SelfCollision));
    }

    #[test]
    fn looping_back_to_the_start_is_not_the_start_screen() {
        let (state, mut rng) = fresh(14);
        let mut state = state.with_food(Some(Position::new(0, 0)));

        for turn in [Direction::Right, Direction::Down, Direction::Left, Direction::Up] {
            state.request_direction_change(turn);
            state = state.step(&mut rng);
        }

        assert_eq!(state.snake.head(), Position::new(8, 10));
        assert!(!state.game_over);
        assert!(!state.is_start_screen());
    }

    #[test]
    fn stored_state_with_empty_snake_is_rejected() {
        let (state, _) = fresh(15);
        let mut json = serde_json::to_value(&state).expect("state serializes");

        let restored: GameState =
            serde_json::from_value(json.clone()).expect("untouched state parses");
        assert_eq!(restored, state);

        json["snake"] = serde_json::json!([]);
        assert!(serde_json::from_value::<GameState>(json).is_err());
    }

    #[test]
    fn game_over_state_is_frozen() {
        let (state, mut rng) = fresh(7);
        let mut state = state;
        state.game_over = true;

        let next = step_state(&state, &mut rng);

        assert_eq!(next, state);
    }

    #[test]
    fn paused_state_is_frozen_and_resumes() {
        let (mut state, mut rng) = fresh(8);
        state.toggle_pause();
        assert_eq!(state.status(), GameStatus::Paused);

        let next = step_state(&state, &mut rng);
        assert_eq!(next, state);

        let mut resumed = next;
        resumed.toggle_pause();
        let moved = step_state(&resumed, &mut rng);
        assert_eq!(moved.snake.head(), Position::new(9, 10));
        assert_eq!(moved.score, state.score);
    }

    #[test]
    fn reversal_request_is_rejected() {
        let (mut state, _) = fresh(9);

        assert!(!state.request_direction_change(Direction::Left));
        assert_eq!(state.next_direction, Direction::Right);

        assert!(state.request_direction_change(Direction::Up));
        assert_eq!(state.next_direction, Direction::Up);
    }

    #[test]
    fn reversal_checks_applied_not_pending_direction() {
        let (mut state, _) = fresh(10);

        assert!(state.request_direction_change(Direction::Up));
        // Down reverses the pending Up but not the applied Right.
        assert!(state.request_direction_change(Direction::Down));
        assert_eq!(state.next_direction, Direction::Down);
    }

    #[test]
    fn latest_accepted_request_wins() {
        let (mut state, mut rng) = fresh(11);

        state.request_direction_change(Direction::Up);
        state.request_direction_change(Direction::Down);
        let next = step_state(&state, &mut rng);

        assert_eq!(next.snake.head(), Position::new(8, 11));
        assert_eq!(next.direction, Direction::Down);
        assert_eq!(next.next_direction, Direction::Down);
    }

    #[test]
    fn unknown_direction_name_is_ignored() {
        let (mut state, _) = fresh(12);

        assert!(!state.request_direction_change_named("sideways"));
        assert_eq!(state.next_direction, Direction::Right);
        assert!(state.request_direction_change_named("up"));
        assert_eq!(state.next_direction, Direction::Up);
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let mut rng = StdRng::seed_from_u64(13);
        let bounds = GridSize::new(4, 1).unwrap();
        let state = create_initial_state(&mut rng, bounds);
        assert_eq!(state.food, Some(Position::new(3, 0)));

        let next = step_state(&state, &mut rng);

        assert!(next.game_over);
        assert_eq!(next.outcome, Some(GameOutcome::BoardFull));
        assert_eq!(next.food, None);
        assert_eq!(next.score, 1);
        assert_eq!(next.snake.len(), 4);
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut state = create_initial_state(&mut rng, GridSize::default());
            let mut history = vec![state.clone()];
            for turn in [Direction::Up, Direction::Left, Direction::Down] {
                state.request_direction_change(turn);
                for _ in 0..4 {
                    state = step_state(&state, &mut rng);
                    history.push(state.clone());
                }
            }
            history
        };

        assert_eq!(run(42), run(42));
    }
}
