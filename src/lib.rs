//! Deterministic grid Snake engine.
//!
//! [`game::step_state`] turns one [`game::GameState`] into the next, with all
//! randomness supplied by the caller. [`session::GameSession`] wraps a state
//! and a seeded generator for drivers that just want to tick.

pub mod config;
pub mod direction;
pub mod error;
pub mod food;
pub mod game;
pub mod input;
pub mod pilot;
pub mod session;
pub mod snake;
pub mod summary;
