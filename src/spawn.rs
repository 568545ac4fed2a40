//! Random placement of food, special food and obstacles.

use std::collections::VecDeque;

use log::{debug, warn};
use rand::Rng;

use crate::collision::{is_obstacle_collision, is_self_collision};
use crate::config::{OBSTACLE_RETRIES, PLACEMENT_RETRIES};
use crate::geometry::{Cell, Grid, Obstacle};

const OBSTACLE_WIDTHS: std::ops::RangeInclusive<i32> = 2..=4;
const OBSTACLE_HEIGHTS: std::ops::RangeInclusive<i32> = 1..=3;

fn is_free(cell: Cell, snake: &VecDeque<Cell>, obstacles: &[Obstacle]) -> bool {
    !is_self_collision(cell, snake) && !is_obstacle_collision(cell, obstacles)
}

/// Picks a cell not covered by the snake or any obstacle.
///
/// Draws uniformly first; after [`PLACEMENT_RETRIES`] misses it scans the board
/// for the first free cell instead. Returns `None` only when nothing is free.
pub fn place_food<R: Rng>(
    rng: &mut R,
    grid: Grid,
    snake: &VecDeque<Cell>,
    obstacles: &[Obstacle],
) -> Option<Cell> {
    if grid.cell_count() == 0 {
        return None;
    }
    for _ in 0..PLACEMENT_RETRIES {
        let candidate = Cell::new(rng.gen_range(0..grid.columns), rng.gen_range(0..grid.rows));
        if is_free(candidate, snake, obstacles) {
            return Some(candidate);
        }
    }
    debug!("food draw missed {PLACEMENT_RETRIES} times, scanning for a free cell");
    let found = grid.cells().find(|cell| is_free(*cell, snake, obstacles));
    if found.is_none() {
        warn!("no free cell left on a {}x{} board", grid.columns, grid.rows);
    }
    found
}

/// Special food follows the food rules with its own draw, so it may land on the
/// standard food.
pub fn place_special_food<R: Rng>(
    rng: &mut R,
    grid: Grid,
    snake: &VecDeque<Cell>,
    obstacles: &[Obstacle],
) -> Option<Cell> {
    place_food(rng, grid, snake, obstacles)
}

/// Builds `count` obstacles, none of which covers a snake segment.
///
/// Obstacles may overlap each other. An obstacle that keeps landing on the snake
/// for [`OBSTACLE_RETRIES`] draws is left out.
pub fn place_obstacles<R: Rng>(
    rng: &mut R,
    grid: Grid,
    count: usize,
    snake: &VecDeque<Cell>,
) -> Vec<Obstacle> {
    let mut obstacles = Vec::with_capacity(count);
    for _ in 0..count {
        let placed = (0..OBSTACLE_RETRIES)
            .filter_map(|_| draw_obstacle(rng, grid))
            .find(|rock| !snake.iter().any(|segment| rock.contains(*segment)));
        match placed {
            Some(rock) => obstacles.push(rock),
            None => debug!("dropping an obstacle that would not fit beside the snake"),
        }
    }
    obstacles
}

fn draw_obstacle<R: Rng>(rng: &mut R, grid: Grid) -> Option<Obstacle> {
    let width = rng.gen_range(OBSTACLE_WIDTHS);
    let height = rng.gen_range(OBSTACLE_HEIGHTS);
    if width > grid.columns || height > grid.rows {
        return None;
    }
    let x = rng.gen_range(0..=grid.columns - width);
    let y = rng.gen_range(0..=grid.rows - height);
    Some(Obstacle::new(x, y, width, height))
}
