//! Predicates over a prospective head cell. All of them are pure.

use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Grid, Obstacle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crash {
    Wall,
    OwnBody,
    Obstacle,
}

pub fn is_out_of_bounds(cell: Cell, grid: Grid) -> bool {
    !grid.contains(cell)
}

/// `body` is the snake before the move, head included.
pub fn is_self_collision<'a>(cell: Cell, body: impl IntoIterator<Item = &'a Cell>) -> bool {
    body.into_iter().any(|segment| *segment == cell)
}

pub fn is_obstacle_collision(cell: Cell, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|rock| rock.contains(cell))
}

/// Runs wall, body and obstacle checks in that order and reports the first hit.
pub fn detect<'a>(
    cell: Cell,
    grid: Grid,
    body: impl IntoIterator<Item = &'a Cell>,
    obstacles: &[Obstacle],
) -> Option<Crash> {
    if is_out_of_bounds(cell, grid) {
        Some(Crash::Wall)
    } else if is_self_collision(cell, body) {
        Some(Crash::OwnBody)
    } else if is_obstacle_collision(cell, obstacles) {
        Some(Crash::Obstacle)
    } else {
        None
    }
}
