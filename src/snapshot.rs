use serde::Serialize;

use crate::collision::Crash;
use crate::config::Difficulty;
use crate::geometry::{Cell, Direction, Grid, Obstacle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Everything a renderer needs for one frame. Owns its data, so holding on to it
/// never blocks the game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub difficulty: Difficulty,
    pub grid: Grid,
    /// Cell edge in pixels, for renderers working in pixel space.
    pub grid_size: u32,
    /// Head first; empty while idle.
    pub snake: Vec<Cell>,
    /// Which way the head faces.
    pub heading: Direction,
    pub food: Option<Cell>,
    pub special_food: Option<Cell>,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    pub best_score: u32,
    pub crash: Option<Crash>,
    pub tick_interval_ms: u64,
}

impl Snapshot {
    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn head(&self) -> Option<Cell> {
        self.snake.first().copied()
    }

    /// Top-left pixel of `cell`.
    pub fn to_pixels(&self, cell: Cell) -> (i64, i64) {
        let size = self.grid_size as i64;
        (cell.x as i64 * size, cell.y as i64 * size)
    }
}
