use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::config::GridSize;
use crate::game::{GameState, create_initial_state, step_state};
use crate::input::GameInput;

/// Owns one running game: its current state, its random stream and a tick count.
///
/// Any number of sessions can live side by side; nothing is shared between them.
#[derive(Debug, Clone)]
pub struct GameSession {
    state: GameState,
    rng: StdRng,
    seed: u64,
    tick_count: u64,
}

impl GameSession {
    /// Starts a game whose food placement is fully determined by `seed`.
    #[must_use]
    pub fn new(bounds: GridSize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = create_initial_state(&mut rng, bounds);

        Self {
            state,
            rng,
            seed,
            tick_count: 0,
        }
    }

    /// Advances one tick and returns the new state.
    pub fn tick(&mut self) -> &GameState {
        if !self.state.game_over && !self.state.paused {
            self.tick_count += 1;
        }

        self.state = step_state(&self.state, &mut self.rng);
        &self.state
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                let _ = self.state.request_direction_change(direction);
            }
            GameInput::Pause => self.state.toggle_pause(),
            GameInput::Restart => self.restart(),
        }
    }

    /// Discards the current game and starts over on the same board.
    ///
    /// The random stream continues, so a restarted game differs from the first.
    pub fn restart(&mut self) {
        debug!(
            score = self.state.score,
            ticks = self.tick_count,
            "restarting"
        );
        self.state = create_initial_state(&mut self.rng, self.state.bounds());
        self.tick_count = 0;
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Live ticks since the game started; paused and game-over ticks do not count.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}
