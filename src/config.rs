use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Logical grid dimensions passed through the game as a named type.
///
/// Deserialization goes through [`GridSize::new`], so a stored grid is
/// always large enough to play on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridDimensions")]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

#[derive(Deserialize)]
struct GridDimensions {
    width: u16,
    height: u16,
}

impl TryFrom<GridDimensions> for GridSize {
    type Error = ConfigError;

    fn try_from(raw: GridDimensions) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl GridSize {
    /// Creates a grid after checking it can seat the starting snake and one food cell.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width < MIN_GRID_WIDTH || height < MIN_GRID_HEIGHT {
            return Err(ConfigError::GridTooSmall { width, height });
        }

        Ok(Self { width, height })
    }

    /// Square grid with `size` cells per side.
    pub fn square(size: u16) -> Result<Self, ConfigError> {
        Self::new(size, size)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
        }
    }
}

/// Cells per side of the default square board.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Narrowest grid that fits the starting snake plus a food cell.
pub const MIN_GRID_WIDTH: u16 = 4;

pub const MIN_GRID_HEIGHT: u16 = 1;

/// Segment count of a freshly created snake.
pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Default tick cap for headless simulation runs.
pub const DEFAULT_MAX_TICKS: u64 = 10_000;
