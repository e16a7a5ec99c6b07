//! Core game logic for Snake
//!
//! Everything in here is pure state manipulation: no I/O, no rendering, no
//! clock. The host drives it with a fixed-interval timer and draws whatever
//! the state says.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::GameConfig;
pub use engine::{GameEngine, StepResult};
pub use state::{Cell, Collision, GameState, Snake};
