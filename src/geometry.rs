use serde::{Deserialize, Serialize};

/// A grid cell, in cell units (column, row). Multiply by the grid size to get pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }

    /// The neighbouring cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Cell {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Unit vector; y grows downwards like screen coordinates.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Viewport size in pixels together with the cell edge length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub grid_size: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, grid_size: u32) -> Self {
        Viewport {
            width,
            height,
            grid_size: grid_size.max(1),
        }
    }

    /// Grid extents. Only whole cells count; a partial strip on the right or
    /// bottom edge is outside the board.
    pub fn grid(&self) -> Grid {
        Grid {
            columns: (self.width / self.grid_size) as i32,
            rows: (self.height / self.grid_size) as i32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub columns: i32,
    pub rows: i32,
}

impl Grid {
    pub fn new(columns: i32, rows: i32) -> Self {
        Grid { columns, rows }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.columns && cell.y >= 0 && cell.y < self.rows
    }

    pub fn cell_count(&self) -> usize {
        (self.columns.max(0) as usize) * (self.rows.max(0) as usize)
    }

    pub fn center(&self) -> Cell {
        Cell::new(self.columns / 2, self.rows / 2)
    }

    /// Row-major walk over every cell of the board.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let columns = self.columns.max(0);
        (0..self.rows.max(0)).flat_map(move |y| (0..columns).map(move |x| Cell::new(x, y)))
    }

    /// Pulls a cell back inside the board, one axis at a time.
    pub fn clamp(&self, cell: Cell) -> Cell {
        Cell {
            x: cell.x.clamp(0, (self.columns - 1).max(0)),
            y: cell.y.clamp(0, (self.rows - 1).max(0)),
        }
    }
}

/// Axis-aligned rectangle covering `width × height` cells from its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Obstacle {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Obstacle {
            x,
            y,
            width,
            height,
        }
    }

    /// Half-open on both axes: the right and bottom edges are not covered.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.x
            && cell.x < self.x + self.width
            && cell.y >= self.y
            && cell.y < self.y + self.height
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Cell::new(x, y)))
    }
}
