use std::fs::File;
use std::io::{stdout, Stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simplelog::{Config, WriteLogger};

use viewport_snake::config::SETTINGS_FILE;
use viewport_snake::input::{command_for_key, SwipeTracker};
use viewport_snake::render::{board_viewport, draw};
use viewport_snake::{Command, Game, JsonScoreStore, Settings};

/// How long to wait for input before redrawing.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(Path::new(SETTINGS_FILE))?;

    WriteLogger::init(
        LevelFilter::Info,
        Config::default(),
        File::create(&settings.log_path)
            .with_context(|| format!("creating log file {}", settings.log_path.display()))?,
    )
    .context("installing logger")?;
    info!("Starting viewport-snake");

    let rng = match settings.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };
    let (columns, rows) = terminal::size()?;
    let mut game = Game::new(
        board_viewport(columns, rows, settings.grid_size),
        Box::new(JsonScoreStore::new(&settings.best_score_path)),
        rng,
    );
    game.select_difficulty(settings.difficulty);

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)?;

    let result = run(&mut game, &mut out, settings.grid_size);

    execute!(out, Show, DisableMouseCapture, LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result?;

    println!("Best score: {}", game.best_score());
    Ok(())
}

fn run(game: &mut Game<ChaCha8Rng>, out: &mut Stdout, grid_size: u32) -> anyhow::Result<()> {
    let clock = Instant::now();
    let mut swipes = SwipeTracker::default();

    loop {
        if event::poll(FRAME)? {
            let command = match event::read()? {
                Event::Key(key) => command_for_key(key),
                Event::Mouse(mouse) => swipes.on_mouse(mouse),
                Event::Resize(columns, rows) => {
                    game.resize(board_viewport(columns, rows, grid_size));
                    None
                }
                _ => None,
            };
            match command {
                Some(Command::Quit) => break,
                Some(command) => {
                    game.apply(command);
                }
                None => {}
            }
        }

        game.advance_to(clock.elapsed());
        draw(out, &game.snapshot())?;
    }

    info!("Quitting with best score {}", game.best_score());
    Ok(())
}
