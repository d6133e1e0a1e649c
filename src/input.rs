use crate::direction::Direction;

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Restart,
}

impl GameInput {
    /// Maps a key name (as reported by a keyboard or on-screen control) to an input.
    ///
    /// Arrow keys and WASD steer, space pauses, `r` restarts. Anything else
    /// maps to `None` and is dropped by the caller.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        let input = match key.to_ascii_lowercase().as_str() {
            "arrowup" | "w" => Self::Direction(Direction::Up),
            "arrowdown" | "s" => Self::Direction(Direction::Down),
            "arrowleft" | "a" => Self::Direction(Direction::Left),
            "arrowright" | "d" => Self::Direction(Direction::Right),
            " " | "space" => Self::Pause,
            "r" => Self::Restart,
            _ => return None,
        };

        Some(input)
    }
}
