use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use viewport_snake::{
    Cell, Crash, Difficulty, Direction, Game, MemoryScoreStore, Phase, Viewport,
};

fn game_with(viewport: Viewport, store: MemoryScoreStore, seed: u64) -> Game<ChaCha8Rng> {
    Game::new(viewport, Box::new(store), ChaCha8Rng::seed_from_u64(seed))
}

fn start(difficulty: Difficulty, viewport: Viewport) -> (Game<ChaCha8Rng>, MemoryScoreStore) {
    let store = MemoryScoreStore::default();
    let mut game = game_with(viewport, store.clone(), 42);
    game.select_difficulty(difficulty);
    assert!(game.start());
    (game, store)
}

fn tick(game: &mut Game<ChaCha8Rng>) {
    let interval = game.tick_interval();
    game.advance(interval);
}

/// Puts food right in front of the head and clears the way to it.
fn feed_next_tick(game: &mut Game<ChaCha8Rng>) {
    let session = game.debug_session().expect("session running");
    let ahead = session.head().step(session.pending_direction());
    session.debug_set_obstacles(Vec::new());
    session.debug_set_food(ahead);
}

#[test]
fn easy_first_food() {
    let (mut game, _) = start(Difficulty::Easy, Viewport::new(800, 600, 20));
    let session = game.session().unwrap();
    assert_eq!(session.snake().len(), 3);
    assert_eq!(session.head(), Cell::new(20, 15));
    assert_eq!(session.direction(), Direction::Right);
    assert!(session.obstacles().is_empty());
    let interval = game.tick_interval();

    feed_next_tick(&mut game);
    tick(&mut game);

    let session = game.session().unwrap();
    assert_eq!(game.score(), 1);
    assert_eq!(session.snake().len(), 4);
    assert_eq!(session.head(), Cell::new(21, 15));
    assert_eq!(game.tick_interval(), interval);
    assert!(!session.snake().contains(&session.food()));
}

#[test]
fn hard_speeds_up_at_five_points() {
    let (mut game, _) = start(Difficulty::Hard, Viewport::new(800, 600, 20));
    let initial = Difficulty::Hard.initial_interval();
    for _ in 0..4 {
        feed_next_tick(&mut game);
        tick(&mut game);
        assert_eq!(game.tick_interval(), initial);
    }
    feed_next_tick(&mut game);
    tick(&mut game);
    assert_eq!(game.score(), 5);
    assert_eq!(game.tick_interval(), initial - Duration::from_millis(5));
}

#[test]
fn ramp_steps_every_five_points_down_to_the_floor() {
    let (mut game, _) = start(Difficulty::Medium, Viewport::new(40_000, 400, 20));
    let initial = Difficulty::Medium.initial_interval().as_millis() as u64;
    for _ in 0..60 {
        feed_next_tick(&mut game);
        tick(&mut game);
        let steps = (game.score() / 5) as u64;
        let expected = initial.saturating_sub(5 * steps).max(30);
        assert_eq!(game.tick_interval(), Duration::from_millis(expected));
    }
    assert_eq!(game.tick_interval(), Duration::from_millis(30));
}

#[test]
fn easy_interval_never_changes() {
    let (mut game, _) = start(Difficulty::Easy, Viewport::new(40_000, 400, 20));
    for _ in 0..25 {
        feed_next_tick(&mut game);
        tick(&mut game);
        assert_eq!(game.tick_interval(), Difficulty::Easy.initial_interval());
    }
    assert_eq!(game.score(), 25);
}

#[test]
fn leaving_the_board_ends_the_game_without_touching_best() {
    let store = MemoryScoreStore::with_best(10);
    let mut game = game_with(Viewport::new(800, 600, 20), store.clone(), 1);
    game.start();
    game.debug_session()
        .unwrap()
        .debug_set_snake(&[Cell::new(0, 4), Cell::new(1, 4), Cell::new(2, 4)], Direction::Left);

    tick(&mut game);

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.session().unwrap().crash(), Some(Crash::Wall));
    assert_eq!(game.session().unwrap().head(), Cell::new(0, 4));
    assert_eq!(game.best_score(), 10);
    assert_eq!(store.saves(), 0);
    assert_eq!(game.snapshot().crash, Some(Crash::Wall));
}

#[test]
fn reversal_is_a_no_op() {
    let (mut game, _) = start(Difficulty::Easy, Viewport::new(800, 600, 20));
    assert!(!game.turn(Direction::Left));
    assert!(game.turn(Direction::Down));
    tick(&mut game);
    assert!(!game.turn(Direction::Up));
    assert_eq!(game.session().unwrap().pending_direction(), Direction::Down);
}

#[test]
fn obstacles_follow_difficulty() {
    for (difficulty, count) in [
        (Difficulty::Easy, 0),
        (Difficulty::Medium, 3),
        (Difficulty::Hard, 6),
    ] {
        let (game, _) = start(difficulty, Viewport::new(1200, 800, 20));
        let session = game.session().unwrap();
        assert_eq!(session.obstacles().len(), count, "{difficulty:?}");
        for rock in session.obstacles() {
            assert!(!session.snake().iter().any(|cell| rock.contains(*cell)));
            assert!(!rock.contains(session.food()));
        }
    }
}

#[test]
fn random_play_keeps_length_and_score_consistent() {
    let mut driver = ChaCha8Rng::seed_from_u64(2024);
    for seed in 0..20 {
        let store = MemoryScoreStore::default();
        let mut game = game_with(Viewport::new(300, 200, 20), store, seed);
        game.select_difficulty(Difficulty::Medium);
        game.start();

        let mut score = game.score();
        let mut length = game.session().unwrap().snake().len();
        for _ in 0..500 {
            if game.phase() != Phase::Running {
                break;
            }
            let direction = match driver.gen_range(0..4) {
                0 => Direction::Up,
                1 => Direction::Down,
                2 => Direction::Left,
                _ => Direction::Right,
            };
            game.turn(direction);
            tick(&mut game);

            let session = game.session().unwrap();
            assert!(game.score() >= score);
            if session.is_over() {
                assert_eq!(session.snake().len(), length);
            } else if game.score() > score {
                assert_eq!(session.snake().len(), length + 1);
            } else {
                assert_eq!(session.snake().len(), length);
            }
            let mut cells: Vec<Cell> = session.snake().iter().copied().collect();
            cells.sort_by_key(|c| (c.x, c.y));
            cells.dedup();
            assert_eq!(cells.len(), session.snake().len());

            score = game.score();
            length = session.snake().len();
        }
        assert!(game.best_score() >= game.score());
    }
}

#[test]
fn resize_pulls_head_back_inside() {
    let (mut game, _) = start(Difficulty::Easy, Viewport::new(800, 600, 20));
    game.resize(Viewport::new(200, 100, 20));
    let session = game.session().unwrap();
    assert_eq!(session.grid().columns, 10);
    assert_eq!(session.head(), Cell::new(9, 4));
    assert_eq!(game.snapshot().grid, session.grid());
}
