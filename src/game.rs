use std::time::Duration;

use log::{debug, info};
use rand::Rng;

use crate::config::{
    Difficulty, SPECIAL_FOOD_LIFETIME, SPECIAL_FOOD_MAX_DELAY, SPECIAL_FOOD_MIN_DELAY,
};
use crate::geometry::{Direction, Viewport};
use crate::input::Command;
use crate::score::{ScoreStore, Scoreboard};
use crate::session::{Session, Step};
use crate::snapshot::{Phase, Snapshot};
use crate::timer::{TimerId, Timers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Tick,
    SpecialFoodDue,
    SpecialFoodExpired,
}

/// Handles for the three timers a session runs on.
#[derive(Debug, Default)]
struct SessionTimers {
    tick: Option<TimerId>,
    special_food_due: Option<TimerId>,
    special_food_expiry: Option<TimerId>,
}

/// The game lifecycle: home screen, play, pause, game over.
///
/// Time only moves when [`Game::advance`] or [`Game::advance_to`] is called, so
/// the same code runs against a wall clock or a test clock.
pub struct Game<R: Rng> {
    rng: R,
    viewport: Viewport,
    difficulty: Difficulty,
    scores: Scoreboard,
    session: Option<Session>,
    timers: Timers<Event>,
    handles: SessionTimers,
}

impl<R: Rng> Game<R> {
    pub fn new(viewport: Viewport, store: Box<dyn ScoreStore>, rng: R) -> Self {
        let scores = Scoreboard::new(store);
        info!("best score on record: {}", scores.best());
        Game {
            rng,
            viewport,
            difficulty: Difficulty::default(),
            scores,
            session: None,
            timers: Timers::new(),
            handles: SessionTimers::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::Idle,
            Some(session) if session.is_over() => Phase::GameOver,
            Some(session) if session.is_paused() => Phase::Paused,
            Some(_) => Phase::Running,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn score(&self) -> u32 {
        self.scores.current()
    }

    pub fn best_score(&self) -> u32 {
        self.scores.best()
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Interval the tick timer is currently armed with.
    pub fn tick_interval(&self) -> Duration {
        self.session
            .as_ref()
            .map(Session::interval)
            .unwrap_or_else(|| self.difficulty.initial_interval())
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Routes a player command. Returns `false` when it did not apply in the
    /// current phase.
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Turn(direction) => self.turn(direction),
            Command::TogglePause => self.toggle_pause(),
            Command::Home => {
                self.go_home();
                true
            }
            Command::Start => self.start(),
            Command::Select(difficulty) => self.select_difficulty(difficulty),
            Command::Quit => false,
        }
    }

    /// Picks the difficulty for the next start. Ignored during play.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if matches!(self.phase(), Phase::Running | Phase::Paused) {
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Begins a fresh session from the home screen or after a game over.
    pub fn start(&mut self) -> bool {
        if matches!(self.phase(), Phase::Running | Phase::Paused) {
            return false;
        }
        self.cancel_timers();
        self.scores.reset_current();
        let session = Session::new(&mut self.rng, self.viewport.grid(), self.difficulty);
        let interval = session.interval();
        self.session = Some(session);
        self.handles.tick = Some(self.timers.schedule(interval, Event::Tick));
        self.schedule_special_food();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.session.as_mut() {
            Some(session) if !session.is_over() => {
                let paused = !session.is_paused();
                session.set_paused(paused);
                debug!("paused: {}", paused);
                true
            }
            _ => false,
        }
    }

    /// Queues a turn. Only a running, unpaused session takes input.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.phase() != Phase::Running {
            return false;
        }
        self.session
            .as_mut()
            .is_some_and(|session| session.turn(direction))
    }

    /// Drops the session and returns to the home screen. The score shown resets
    /// and the difficulty goes back to easy.
    pub fn go_home(&mut self) {
        self.cancel_timers();
        self.session = None;
        self.scores.reset_current();
        self.difficulty = Difficulty::default();
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        if let Some(session) = self.session.as_mut() {
            session.resize(viewport.grid());
        }
    }

    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.timers.now() + elapsed;
        self.advance_to(until);
    }

    /// Fires every timer due up to `now`, in deadline order.
    pub fn advance_to(&mut self, now: Duration) {
        while let Some((_, event)) = self.timers.pop_due(now) {
            match event {
                Event::Tick => self.on_tick(),
                Event::SpecialFoodDue => self.on_special_food_due(),
                Event::SpecialFoodExpired => self.on_special_food_expired(),
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let session = self.session.as_ref();
        Snapshot {
            phase: self.phase(),
            difficulty: session.map_or(self.difficulty, Session::difficulty),
            grid: session.map_or_else(|| self.viewport.grid(), Session::grid),
            grid_size: self.viewport.grid_size,
            snake: session
                .map(|s| s.snake().iter().copied().collect())
                .unwrap_or_default(),
            heading: session.map_or(Direction::Right, Session::direction),
            food: session.map(Session::food),
            special_food: session.and_then(Session::special_food),
            obstacles: session.map(|s| s.obstacles().to_vec()).unwrap_or_default(),
            score: self.scores.current(),
            best_score: self.scores.best(),
            crash: session.and_then(Session::crash),
            tick_interval_ms: self.tick_interval().as_millis() as u64,
        }
    }

    fn on_tick(&mut self) {
        self.handles.tick = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.step(&mut self.rng, &mut self.scores) {
            Step::Crashed(_) => {
                self.cancel_timers();
                return;
            }
            Step::Ate { sped_up: true } => {
                info!("speeding up to {:?} per tick", session.interval());
            }
            Step::AteSpecial => {
                self.timers.cancel_slot(&mut self.handles.special_food_expiry);
            }
            _ => {}
        }
        let interval = session.interval();
        self.handles.tick = Some(self.timers.schedule(interval, Event::Tick));
    }

    /// The schedule keeps going while paused; it just skips the spawn.
    fn on_special_food_due(&mut self) {
        self.handles.special_food_due = None;
        if self.phase() == Phase::Running {
            if let Some(session) = self.session.as_mut() {
                if let Some(cell) = session.spawn_special_food(&mut self.rng) {
                    debug!("special food at {:?}", cell);
                    self.timers.cancel_slot(&mut self.handles.special_food_expiry);
                    self.handles.special_food_expiry = Some(
                        self.timers
                            .schedule(SPECIAL_FOOD_LIFETIME, Event::SpecialFoodExpired),
                    );
                }
            }
        }
        self.schedule_special_food();
    }

    fn on_special_food_expired(&mut self) {
        self.handles.special_food_expiry = None;
        if let Some(session) = self.session.as_mut() {
            debug!("special food expired");
            session.clear_special_food();
        }
    }

    fn schedule_special_food(&mut self) {
        let min = SPECIAL_FOOD_MIN_DELAY.as_millis() as u64;
        let max = SPECIAL_FOOD_MAX_DELAY.as_millis() as u64;
        let delay = Duration::from_millis(self.rng.gen_range(min..max));
        self.handles.special_food_due = Some(self.timers.schedule(delay, Event::SpecialFoodDue));
    }

    fn cancel_timers(&mut self) {
        self.timers.cancel_slot(&mut self.handles.tick);
        self.timers.cancel_slot(&mut self.handles.special_food_due);
        self.timers.cancel_slot(&mut self.handles.special_food_expiry);
    }

    /// Direct access to the live session, for tests and tooling that need to
    /// stage a board.
    pub fn debug_session(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }
}
