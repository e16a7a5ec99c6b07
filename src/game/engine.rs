use rand::Rng;

use super::{
    action::Direction,
    config::GameConfig,
    state::{Cell, Collision, GameState, Snake},
};

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the snake ate the apple this tick
    pub ate_apple: bool,
    /// What the snake ran into, if anything
    pub collision: Option<Collision>,
    /// Whether the round is over
    pub terminated: bool,
}

/// The game engine: advances a `GameState` one tick at a time.
/// Holds no I/O, no clock; the host owns scheduling and rendering.
pub struct GameEngine {
    config: GameConfig,
    rng: rand::rngs::ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: rand::thread_rng(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fresh round: stacked two-segment snake, fixed initial apple,
    /// heading right.
    pub fn reset(&mut self) -> GameState {
        GameState::new(
            Snake::stacked_at(self.config.snake_spawn()),
            Direction::Right,
            self.config.apple_spawn(),
            self.config.grid_size,
        )
    }

    /// Advance one tick. `steer` is the direction pressed since the last
    /// tick, if any; it is applied unconditionally, so steering back into
    /// the body is a legal move that loses.
    pub fn step(&mut self, state: &mut GameState, steer: Option<Direction>) -> StepResult {
        if !state.alive {
            return StepResult {
                ate_apple: false,
                collision: None,
                terminated: true,
            };
        }

        if let Some(direction) = steer {
            state.direction = direction;
        }

        let new_head = state.snake.head().moved(state.direction);

        // Game over freezes the round: snake, apple and score stay as they
        // were on the last live tick.
        if let Some(collision) = self.check_collision(state, new_head) {
            state.alive = false;
            state.ticks += 1;

            return StepResult {
                ate_apple: false,
                collision: Some(collision),
                terminated: true,
            };
        }

        let ate_apple = new_head == state.apple;
        state.snake.advance(new_head, ate_apple);

        if ate_apple {
            state.score += 1;
            state.apple = self.random_apple();
        }

        state.ticks += 1;

        StepResult {
            ate_apple,
            collision: None,
            terminated: false,
        }
    }

    /// Check if the new head cell ends the round
    fn check_collision(&self, state: &GameState, cell: Cell) -> Option<Collision> {
        if !state.in_bounds(cell) {
            return Some(Collision::Wall);
        }

        if state.snake.contains(cell) {
            return Some(Collision::Body);
        }

        None
    }

    /// Uniformly random cell over the whole grid. Cells under the snake are
    /// not excluded; the apple can land on the body and be picked up as the
    /// head passes over it.
    fn random_apple(&mut self) -> Cell {
        let n = self.config.grid_size as i32;
        Cell::new(self.rng.gen_range(0..n), self.rng.gen_range(0..n))
    }
}
