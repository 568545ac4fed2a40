use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

use crate::config::Difficulty;
use crate::geometry::Direction;

/// Something the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Turn(Direction),
    TogglePause,
    Home,
    /// Start from the home screen, or restart after a game over.
    Start,
    Select(Difficulty),
    Quit,
}

pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let command = match key.code {
        KeyCode::Up => Command::Turn(Direction::Up),
        KeyCode::Down => Command::Turn(Direction::Down),
        KeyCode::Left => Command::Turn(Direction::Left),
        KeyCode::Right => Command::Turn(Direction::Right),
        KeyCode::Char(' ') | KeyCode::Esc => Command::TogglePause,
        KeyCode::Char('h') | KeyCode::Char('H') => Command::Home,
        KeyCode::Enter => Command::Start,
        KeyCode::Char('1') => Command::Select(Difficulty::Easy),
        KeyCode::Char('2') => Command::Select(Difficulty::Medium),
        KeyCode::Char('3') => Command::Select(Difficulty::Hard),
        KeyCode::Char('q') => Command::Quit,
        _ => return None,
    };
    Some(command)
}

/// Direction of a swipe from its displacement (screen axes, y down).
///
/// The dominant axis wins; a diagonal tie counts as vertical. No movement at
/// all is not a swipe.
pub fn swipe_direction(dx: i32, dy: i32) -> Option<Direction> {
    if dx.abs() > dy.abs() {
        Some(if dx > 0 { Direction::Right } else { Direction::Left })
    } else if dy > 0 {
        Some(Direction::Down)
    } else if dy < 0 {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Turns a mouse drag into a swipe.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    origin: Option<(u16, u16)>,
}

impl SwipeTracker {
    pub fn on_mouse(&mut self, event: MouseEvent) -> Option<Command> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.origin = Some((event.column, event.row));
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let (x0, y0) = self.origin.take()?;
                let dx = event.column as i32 - x0 as i32;
                let dy = event.row as i32 - y0 as i32;
                swipe_direction(dx, dy).map(Command::Turn)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(command_for_key(press(KeyCode::Left)), Some(Command::Turn(Direction::Left)));
        assert_eq!(command_for_key(press(KeyCode::Esc)), Some(Command::TogglePause));
        assert_eq!(command_for_key(press(KeyCode::Char(' '))), Some(Command::TogglePause));
        assert_eq!(command_for_key(press(KeyCode::Char('H'))), Some(Command::Home));
        assert_eq!(
            command_for_key(press(KeyCode::Char('3'))),
            Some(Command::Select(Difficulty::Hard))
        );
        assert_eq!(command_for_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn swipe_quadrants() {
        assert_eq!(swipe_direction(10, 3), Some(Direction::Right));
        assert_eq!(swipe_direction(-10, 3), Some(Direction::Left));
        assert_eq!(swipe_direction(2, 9), Some(Direction::Down));
        assert_eq!(swipe_direction(2, -9), Some(Direction::Up));
        assert_eq!(swipe_direction(4, -4), Some(Direction::Up));
        assert_eq!(swipe_direction(0, 0), None);
    }

    #[test]
    fn drag_becomes_turn() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10)), None);
        assert_eq!(
            tracker.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 3, 11)),
            Some(Command::Turn(Direction::Left))
        );
        assert_eq!(tracker.on_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 3, 11)), None);
    }
}
