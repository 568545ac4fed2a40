use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Cell edge length in pixels.
pub const GRID_SIZE: u32 = 20;
/// Segments a fresh snake spawns with.
pub const SPAWN_LENGTH: usize = 3;

pub const SPEED_RAMP_EVERY: u32 = 5;
pub const SPEED_RAMP_STEP: Duration = Duration::from_millis(5);
pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(30);

pub const FOOD_POINTS: u32 = 1;
pub const SPECIAL_FOOD_POINTS: u32 = 5;
/// Special food shows up somewhere in `[MIN, MAX)` after the previous draw.
pub const SPECIAL_FOOD_MIN_DELAY: Duration = Duration::from_secs(10);
pub const SPECIAL_FOOD_MAX_DELAY: Duration = Duration::from_secs(20);
pub const SPECIAL_FOOD_LIFETIME: Duration = Duration::from_secs(5);

/// Random draws before falling back to scanning the board for a free cell.
pub const PLACEMENT_RETRIES: usize = 256;
pub const OBSTACLE_RETRIES: usize = 32;

pub const BEST_SCORE_SLOT: &str = "snakeHighScore";
pub const SETTINGS_FILE: &str = "viewport-snake.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn initial_interval(self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(120),
            Difficulty::Medium => Duration::from_millis(80),
            Difficulty::Hard => Duration::from_millis(50),
        }
    }

    pub fn obstacle_count(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 3,
            Difficulty::Hard => 6,
        }
    }

    pub fn ramps_speed(self) -> bool {
        self != Difficulty::Easy
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Tick interval after reaching `score`, given the interval in force before it.
pub fn ramped_interval(difficulty: Difficulty, score: u32, current: Duration) -> Duration {
    if !difficulty.ramps_speed() || score == 0 || score % SPEED_RAMP_EVERY != 0 {
        return current;
    }
    current
        .saturating_sub(SPEED_RAMP_STEP)
        .max(MIN_TICK_INTERVAL)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid_size: u32,
    pub difficulty: Difficulty,
    pub best_score_path: PathBuf,
    pub log_path: PathBuf,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            grid_size: GRID_SIZE,
            difficulty: Difficulty::Easy,
            best_score_path: PathBuf::from(".viewport_snake_best.json"),
            log_path: PathBuf::from("viewport-snake.log"),
            seed: None,
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or the defaults when the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        let settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings in {}", path.display()))?;
        Ok(settings)
    }
}
