//! Grid snake for the terminal, with a persistent high score
//!
//! This library provides:
//! - Core game logic (game module): a pure state machine advanced one tick
//!   at a time, no I/O
//! - Persistent key-value storage for the high score (storage module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - The game loop host tying timer, input, rendering and storage together
//!   (app module)

pub mod app;
pub mod game;
pub mod input;
pub mod render;
pub mod stats;
pub mod storage;
