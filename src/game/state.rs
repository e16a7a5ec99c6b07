use std::collections::VecDeque;

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighboring cell in a direction
    pub fn moved(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake: ordered cells, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: VecDeque<Cell>,
}

impl Snake {
    /// The starting snake: two segments stacked on the spawn cell.
    /// The duplicate resolves on the first tick, when the head moves off
    /// and the tail stays behind.
    pub fn stacked_at(spawn: Cell) -> Self {
        Self {
            body: VecDeque::from([spawn, spawn]),
        }
    }

    /// Get the head cell
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Check whether any segment occupies the given cell
    pub fn contains(&self, cell: Cell) -> bool {
        self.body.iter().any(|&c| c == cell)
    }

    /// Advance by one cell: the new head is prepended; the tail is kept
    /// when growing and dropped otherwise.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the grid
    Wall,
    /// Head landed on an existing snake segment
    Body,
}

/// Complete game state for one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// Travel direction; updated by input, applied on the next tick
    pub direction: Direction,
    pub apple: Cell,
    /// Side length of the square grid
    pub grid_size: usize,
    pub score: u32,
    pub ticks: u32,
    pub alive: bool,
}

impl GameState {
    pub fn new(snake: Snake, direction: Direction, apple: Cell, grid_size: usize) -> Self {
        Self {
            snake,
            direction,
            apple,
            grid_size,
            score: 0,
            ticks: 0,
            alive: true,
        }
    }

    /// Check if a cell lies within [0, N) on both axes
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0
            && cell.x < self.grid_size as i32
            && cell.y >= 0
            && cell.y < self.grid_size as i32
    }
}
