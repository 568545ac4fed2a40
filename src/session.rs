use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info, warn};
use rand::Rng;

use crate::collision::{self, Crash};
use crate::config::{ramped_interval, Difficulty, FOOD_POINTS, SPAWN_LENGTH, SPECIAL_FOOD_POINTS};
use crate::geometry::{Cell, Direction, Grid, Obstacle};
use crate::score::Scoreboard;
use crate::spawn;

/// What a single tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing happened: the session is paused or already over.
    Idle,
    Moved,
    Ate { sped_up: bool },
    AteSpecial,
    Crashed(Crash),
}

/// One round of play, from start until the snake crashes or the player leaves.
#[derive(Debug, Clone)]
pub struct Session {
    difficulty: Difficulty,
    grid: Grid,
    snake: VecDeque<Cell>,
    direction: Direction,
    pending: Direction,
    food: Cell,
    special_food: Option<Cell>,
    obstacles: Vec<Obstacle>,
    interval: Duration,
    paused: bool,
    crash: Option<Crash>,
}

impl Session {
    /// Snake of [`SPAWN_LENGTH`] segments centred on the board, heading right,
    /// with fresh obstacles and food.
    pub fn new<R: Rng>(rng: &mut R, grid: Grid, difficulty: Difficulty) -> Self {
        let center = grid.center();
        let snake: VecDeque<Cell> = (0..SPAWN_LENGTH as i32)
            .map(|i| Cell::new(center.x - i, center.y))
            .collect();
        let obstacles = spawn::place_obstacles(rng, grid, difficulty.obstacle_count(), &snake);
        let food = spawn::place_food(rng, grid, &snake, &obstacles).unwrap_or_else(|| {
            warn!("no room for food on a {}x{} board", grid.columns, grid.rows);
            center
        });
        info!(
            "new {} session on {}x{} grid with {} obstacles",
            difficulty.label(),
            grid.columns,
            grid.rows,
            obstacles.len()
        );

        Session {
            difficulty,
            grid,
            snake,
            direction: Direction::Right,
            pending: Direction::Right,
            food,
            special_food: None,
            obstacles,
            interval: difficulty.initial_interval(),
            paused: false,
            crash: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Head first.
    pub fn snake(&self) -> &VecDeque<Cell> {
        &self.snake
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Direction of the last applied move.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next tick will move in.
    pub fn pending_direction(&self) -> Direction {
        self.pending
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn special_food(&self) -> Option<Cell> {
        self.special_food
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn crash(&self) -> Option<Crash> {
        self.crash
    }

    pub fn is_over(&self) -> bool {
        self.crash.is_some()
    }

    /// Queues a turn for the next tick. Reversing onto the body is ignored.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.opposite() {
            return false;
        }
        self.pending = direction;
        true
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn step<R: Rng>(&mut self, rng: &mut R, scores: &mut Scoreboard) -> Step {
        if self.paused || self.crash.is_some() {
            return Step::Idle;
        }

        self.direction = self.pending;
        let new_head = self.head().step(self.direction);

        if let Some(crash) = collision::detect(new_head, self.grid, &self.snake, &self.obstacles) {
            self.crash = Some(crash);
            scores.commit();
            info!("game over ({:?}) with score {}", crash, scores.current());
            return Step::Crashed(crash);
        }

        self.snake.push_front(new_head);

        if new_head == self.food {
            scores.record(FOOD_POINTS);
            match spawn::place_food(rng, self.grid, &self.snake, &self.obstacles) {
                Some(food) => self.food = food,
                None => warn!("board is full, food stays where it was"),
            }
            let ramped = ramped_interval(self.difficulty, scores.current(), self.interval);
            let sped_up = ramped != self.interval;
            if sped_up {
                debug!("tick interval {:?} -> {:?}", self.interval, ramped);
                self.interval = ramped;
            }
            Step::Ate { sped_up }
        } else if self.special_food == Some(new_head) {
            scores.record(SPECIAL_FOOD_POINTS);
            self.special_food = None;
            Step::AteSpecial
        } else {
            self.snake.pop_back();
            Step::Moved
        }
    }

    /// Drops a special food on a free cell. Returns where it landed.
    pub fn spawn_special_food<R: Rng>(&mut self, rng: &mut R) -> Option<Cell> {
        self.special_food =
            spawn::place_special_food(rng, self.grid, &self.snake, &self.obstacles);
        self.special_food
    }

    pub fn clear_special_food(&mut self) {
        self.special_food = None;
    }

    /// Adopts a new board size, pulling the head back inside if it fell off.
    pub fn resize(&mut self, grid: Grid) {
        self.grid = grid;
        let head = self.head();
        let clamped = grid.clamp(head);
        if clamped != head {
            debug!("resize moved head from {:?} to {:?}", head, clamped);
            self.snake[0] = clamped;
        }
    }

    /// Replaces the snake, head first. An empty slice is ignored.
    pub fn debug_set_snake(&mut self, snake: &[Cell], direction: Direction) {
        if snake.is_empty() {
            return;
        }
        self.snake = snake.iter().copied().collect();
        self.direction = direction;
        self.pending = direction;
    }

    pub fn debug_set_food(&mut self, food: Cell) {
        self.food = food;
    }

    pub fn debug_set_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = obstacles;
    }

    pub fn debug_set_special_food(&mut self, cell: Cell) {
        self.special_food = Some(cell);
    }
}
