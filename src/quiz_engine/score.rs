//! Best-score persistence.
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`ScoreStore`] | Key-value durable store holding integers |
//! | [`MemoryStore`] | Process-local store, for tests and ephemeral play |
//! | [`JsonFileStore`] | One JSON object (`{ "key": value }`) in a file |
//! | [`ScoreRecord`] | Monotone best-score value on top of a store |

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::quiz_engine::error::{QuizError, Result};

/// Durable key-value storage for integer values.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Result<Option<u32>>;

    fn set(&mut self, key: &str, value: u32) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.values.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Stores all keys in one JSON file. A missing or blank file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, u32>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| self.storage_error(e))?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|e| self.storage_error(e))
    }

    fn storage_error(&self, e: impl std::fmt::Display) -> QuizError {
        QuizError::Storage(format!("{}: {e}", self.path.display()))
    }
}

impl ScoreStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<u32>> {
        Ok(self.read_all()?.get(key).copied())
    }

    fn set(&mut self, key: &str, value: u32) -> Result<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value);
        let json = serde_json::to_string_pretty(&values).map_err(|e| self.storage_error(e))?;

        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| self.storage_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.storage_error(e))?;
        debug!("wrote {key}={value} to {}", self.path.display());
        Ok(())
    }
}

/// The best points total ever achieved. Only ever increases.
#[derive(Debug)]
pub struct ScoreRecord<S: ScoreStore> {
    store: S,
    key: String,
    best: Option<u32>,
}

impl<S: ScoreStore> ScoreRecord<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        ScoreRecord { store, key: key.into(), best: None }
    }

    /// Read the persisted best score; 0 if nothing was stored yet.
    pub fn load(&mut self) -> Result<u32> {
        let best = self.store.get(&self.key)?.unwrap_or(0);
        self.best = Some(best);
        Ok(best)
    }

    /// Persist `points` if it beats the stored best. Returns whether it did.
    ///
    /// Safe to call after every answer: equal or lower values are no-ops.
    pub fn record_if_better(&mut self, points: u32) -> Result<bool> {
        let current = match self.best {
            Some(best) => best,
            None => self.load()?,
        };
        if points <= current {
            return Ok(false);
        }
        self.store.set(&self.key, points)?;
        self.best = Some(points);
        info!(previous = current, best = points, "new best score");
        Ok(true)
    }

    /// Last known best without touching the store.
    pub fn best(&self) -> u32 {
        self.best.unwrap_or(0)
    }
}
