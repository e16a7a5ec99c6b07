use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::Cell;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid, in cells
    pub grid_size: usize,
    /// Milliseconds between game ticks
    pub tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            tick_ms: 100,
        }
    }
}

impl GameConfig {
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Small grid for tests
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Where the snake starts: left of center, vertically centered.
    /// For the default 20-cell grid this is (4, 10).
    pub fn snake_spawn(&self) -> Cell {
        Cell::new((self.grid_size / 5) as i32, (self.grid_size / 2) as i32)
    }

    /// Where the first apple sits: right of center, same row as the snake.
    /// For the default 20-cell grid this is (14, 10).
    pub fn apple_spawn(&self) -> Cell {
        Cell::new((self.grid_size * 7 / 10) as i32, (self.grid_size / 2) as i32)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
