//! High-score persistence.

use std::cell::Cell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

/// Persisted scalar store. Read once when the engine is built, written only
/// when the score may have improved.
pub trait HighScoreStore {
    /// Stored value, `0` if nothing was stored yet.
    fn get(&self) -> u32;
    fn set(&mut self, score: u32);
}

/// Plain-text file holding a single integer.
#[derive(Clone, Debug)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.bullet_dodge_score`, or the working directory without `HOME`.
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(".bullet_dodge_score")
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn get(&self) -> u32 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    fn set(&mut self, score: u32) {
        if let Err(err) = fs::write(&self.path, score.to_string()) {
            log::warn!("could not save high score to {}: {}", self.path.display(), err);
        }
    }
}

/// In-memory store. Clones share the value.
#[derive(Clone, Debug, Default)]
pub struct MemoryHighScoreStore {
    value: Rc<Cell<u32>>,
    writes: Rc<Cell<u32>>,
}

impl MemoryHighScoreStore {
    pub fn new(initial: u32) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl HighScoreStore for MemoryHighScoreStore {
    fn get(&self) -> u32 {
        self.value.get()
    }

    fn set(&mut self, score: u32) {
        self.value.set(score);
        self.writes.set(self.writes.get() + 1);
    }
}
