use serde::{Deserialize, Serialize};

use crate::config::GridSize;
use crate::game::{GameOutcome, GameStatus};
use crate::session::GameSession;

/// Result of one headless run, printed as JSON by the simulator.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub seed: u64,
    pub grid: GridSize,
    pub ticks: u64,
    pub score: u32,
    pub length: usize,
    pub status: GameStatus,
    /// `None` when the run stopped on the tick cap.
    pub outcome: Option<GameOutcome>,
}

impl GameSummary {
    #[must_use]
    pub fn from_session(session: &GameSession) -> Self {
        let state = session.state();
        Self {
            seed: session.seed(),
            grid: state.bounds(),
            ticks: session.tick_count(),
            score: state.score,
            length: state.snake.len(),
            status: state.status(),
            outcome: state.outcome,
        }
    }
}
