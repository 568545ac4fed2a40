//! Terminal renderer. One terminal character per grid cell.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::collision::Crash;
use crate::config::Difficulty;
use crate::geometry::{Cell, Direction, Viewport};
use crate::snapshot::{Phase, Snapshot};

/// Rows above the board: the HUD line and the top border.
const TOP_ROWS: u16 = 2;
/// Rows below the board: bottom border and the help line.
const BOTTOM_ROWS: u16 = 2;

/// Board viewport that fits a terminal of `columns × rows` characters.
pub fn board_viewport(columns: u16, rows: u16, grid_size: u32) -> Viewport {
    let board_columns = columns.saturating_sub(2) as u32;
    let board_rows = rows.saturating_sub(TOP_ROWS + BOTTOM_ROWS) as u32;
    Viewport::new(board_columns * grid_size, board_rows * grid_size, grid_size)
}

fn head_glyph(heading: Direction) -> char {
    match heading {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Character for the board cell at `cell`, topmost layer first.
fn glyph_at(snapshot: &Snapshot, cell: Cell) -> char {
    if snapshot.head() == Some(cell) {
        head_glyph(snapshot.heading)
    } else if snapshot.snake.contains(&cell) {
        'o'
    } else if snapshot.special_food == Some(cell) {
        '$'
    } else if snapshot.food == Some(cell) {
        '*'
    } else if snapshot.obstacles.iter().any(|rock| rock.contains(cell)) {
        '#'
    } else {
        ' '
    }
}

fn crash_text(crash: Option<Crash>) -> &'static str {
    match crash {
        Some(Crash::Wall) => "You left the board",
        Some(Crash::OwnBody) => "You bit yourself",
        Some(Crash::Obstacle) => "You hit a rock",
        None => "",
    }
}

fn difficulty_menu(selected: Difficulty) -> String {
    [
        ('1', Difficulty::Easy),
        ('2', Difficulty::Medium),
        ('3', Difficulty::Hard),
    ]
    .iter()
    .map(|(key, difficulty)| {
        if *difficulty == selected {
            format!("[{}] {}", key, difficulty.label().to_uppercase())
        } else {
            format!(" {}  {}", key, difficulty.label())
        }
    })
    .collect::<Vec<_>>()
    .join("   ")
}

pub fn draw<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    match snapshot.phase {
        Phase::Idle => draw_home(out, snapshot)?,
        Phase::Running | Phase::Paused | Phase::GameOver => draw_board(out, snapshot)?,
    }
    out.flush()
}

fn draw_home<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    queue!(
        out,
        MoveTo(2, 1),
        Print("S N A K E"),
        MoveTo(2, 3),
        Print(format!("Best: {}", snapshot.best_score)),
        MoveTo(2, 5),
        Print(difficulty_menu(snapshot.difficulty)),
        MoveTo(2, 7),
        Print("Enter to start, q to quit")
    )
}

fn draw_board<W: Write>(out: &mut W, snapshot: &Snapshot) -> io::Result<()> {
    let columns = snapshot.grid.columns.max(0) as u16;
    let rows = snapshot.grid.rows.max(0) as u16;

    let mut hud = format!(
        "Score: {}   Best: {}   {}",
        snapshot.score,
        snapshot.best_score,
        snapshot.difficulty.label()
    );
    if snapshot.is_paused() {
        hud.push_str("   PAUSED");
    }
    queue!(out, MoveTo(0, 0), Print(hud))?;

    let border = "#".repeat(columns as usize + 2);
    queue!(out, MoveTo(0, TOP_ROWS - 1), Print(&border))?;
    for y in 0..rows {
        let line: String = (0..columns)
            .map(|x| glyph_at(snapshot, Cell::new(x as i32, y as i32)))
            .collect();
        queue!(out, MoveTo(0, TOP_ROWS + y), Print(format!("|{}|", line)))?;
    }
    queue!(out, MoveTo(0, TOP_ROWS + rows), Print(&border))?;

    let help = match snapshot.phase {
        Phase::GameOver => format!(
            "Game Over! {}. Final score: {}   Enter: restart   h: home",
            crash_text(snapshot.crash),
            snapshot.score
        ),
        _ => "Arrows/drag: move   Space/Esc: pause   h: home   q: quit".to_string(),
    };
    queue!(out, MoveTo(0, TOP_ROWS + rows + 1), Print(help))
}
