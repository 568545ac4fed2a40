//! Snake on a board sized by the viewport, with obstacles, bonus food and a
//! score-driven speed ramp. The core is headless: drive it with [`Game::advance`]
//! and draw from [`Game::snapshot`].

pub mod collision;
pub mod config;
pub mod game;
pub mod geometry;
pub mod input;
pub mod render;
pub mod score;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod timer;

pub use collision::Crash;
pub use config::{Difficulty, Settings};
pub use game::Game;
pub use geometry::{Cell, Direction, Grid, Obstacle, Viewport};
pub use input::Command;
pub use score::{JsonScoreStore, MemoryScoreStore, ScoreStore, Scoreboard};
pub use session::{Session, Step};
pub use snapshot::{Phase, Snapshot};
