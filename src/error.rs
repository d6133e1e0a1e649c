use thiserror::Error;

/// Rejected board configuration.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid {width}x{height} is too small; need at least 4 columns and 1 row")]
    GridTooSmall { width: u16, height: u16 },
}

/// A direction name that is not one of up/down/left/right.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("unknown direction `{0}`")]
pub struct ParseDirectionError(pub String);

/// A snake body with no segments.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("snake body must contain at least one segment")]
pub struct EmptySnakeError;
