use std::cell::Cell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use log::{error, info};
use serde_json::{Map, Value};

use crate::config::BEST_SCORE_SLOT;

/// Where the best score lives between runs.
pub trait ScoreStore {
    /// Stored best score, 0 when nothing has been saved yet.
    fn load_best(&self) -> u32;
    fn save_best(&mut self, best: u32);
}

/// Best score kept under a named slot of a small JSON object file.
pub struct JsonScoreStore {
    path: PathBuf,
    slot: String,
}

impl JsonScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonScoreStore {
            path: path.into(),
            slot: BEST_SCORE_SLOT.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> io::Result<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e),
        };
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "best score file is not a JSON object",
            )),
        }
    }
}

impl ScoreStore for JsonScoreStore {
    fn load_best(&self) -> u32 {
        match self.read_object() {
            Ok(map) => map
                .get(&self.slot)
                .and_then(Value::as_u64)
                .map(|best| best.min(u32::MAX as u64) as u32)
                .unwrap_or(0),
            Err(e) => {
                error!("Error loading best score from {}: {}", self.path.display(), e);
                0
            }
        }
    }

    fn save_best(&mut self, best: u32) {
        let mut map = self.read_object().unwrap_or_default();
        map.insert(self.slot.clone(), Value::from(best));
        let written = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(io::Error::from)
            .and_then(|text| fs::write(&self.path, text));
        if let Err(e) = written {
            error!("Error saving best score to {}: {}", self.path.display(), e);
        }
    }
}

/// In-process store. Clones share the same slot, so a test can keep one clone
/// and hand the other to the game.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Rc<Cell<u32>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryScoreStore {
    pub fn with_best(best: u32) -> Self {
        let store = MemoryScoreStore::default();
        store.best.set(best);
        store
    }

    pub fn best(&self) -> u32 {
        self.best.get()
    }

    /// Number of `save_best` calls seen so far.
    pub fn saves(&self) -> usize {
        self.saves.get()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load_best(&self) -> u32 {
        self.best.get()
    }

    fn save_best(&mut self, best: u32) {
        self.best.set(best);
        self.saves.set(self.saves.get() + 1);
    }
}

/// Current score plus the persisted best.
pub struct Scoreboard {
    current: u32,
    best: u32,
    store: Box<dyn ScoreStore>,
}

impl Scoreboard {
    pub fn new(store: Box<dyn ScoreStore>) -> Self {
        let best = store.load_best();
        Scoreboard {
            current: 0,
            best,
            store,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Adds `delta` points. Returns `true` when this set a new best, which is
    /// then already saved.
    pub fn record(&mut self, delta: u32) -> bool {
        self.current = self.current.saturating_add(delta);
        self.commit()
    }

    /// Saves the current score if it beats the best one.
    pub fn commit(&mut self) -> bool {
        if self.current <= self.best {
            return false;
        }
        self.best = self.current;
        self.store.save_best(self.best);
        info!("new best score {}", self.best);
        true
    }

    pub fn reset_current(&mut self) {
        self.current = 0;
    }
}
