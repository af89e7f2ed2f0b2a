//! Best-score persistence port.
//!
//! The engine never touches storage; the hosting app hands a store to
//! its presentation layer and writes through this trait whenever the
//! score passes the recorded best. Persistence is best-effort: a
//! missing or unreadable backing file behaves as a zero best score,
//! and write failures are logged, never surfaced to the player.

use std::fs;
use std::path::PathBuf;

use log::warn;

pub trait BestScoreStore {
    /// Read the persisted best score; 0 when absent or unreadable.
    fn load(&self) -> u64;

    /// Persist a new best score. Failures are logged and swallowed.
    fn save(&mut self, score: u64);
}

/// Best score kept as a single integer in a text file.
pub struct FileBestScoreStore {
    path: PathBuf,
}

impl FileBestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl BestScoreStore for FileBestScoreStore {
    fn load(&self) -> u64 {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0)
    }

    fn save(&mut self, score: u64) {
        if let Err(err) = fs::write(&self.path, score.to_string()) {
            warn!(
                "failed to persist best score to {}: {err}",
                self.path.display()
            );
        }
    }
}

/// In-process store for tests and no-persistence runs.
#[derive(Debug, Default)]
pub struct MemoryBestScoreStore {
    best: u64,
}

impl BestScoreStore for MemoryBestScoreStore {
    fn load(&self) -> u64 {
        self.best
    }

    fn save(&mut self, score: u64) {
        self.best = score;
    }
}
