//! Completion progress and its persistence.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::levels::Level;
use crate::storage::KeyValueStorage;

/// Which levels have been solved.
///
/// Stored as `{"level1": bool, ..., "level5": bool}`. Missing fields read as
/// `false` and unknown fields are ignored, so older or newer blobs still load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub level1: bool,
    pub level2: bool,
    pub level3: bool,
    pub level4: bool,
    pub level5: bool,
}

impl Progress {
    fn slot(&mut self, level: Level) -> &mut bool {
        match level.number() {
            1 => &mut self.level1,
            2 => &mut self.level2,
            3 => &mut self.level3,
            4 => &mut self.level4,
            _ => &mut self.level5,
        }
    }

    pub fn is_complete(&self, level: Level) -> bool {
        match level.number() {
            1 => self.level1,
            2 => self.level2,
            3 => self.level3,
            4 => self.level4,
            _ => self.level5,
        }
    }

    /// Monotonic: there is no way to un-complete a single level.
    pub fn mark_complete(&mut self, level: Level) {
        *self.slot(level) = true;
    }

    /// Highest completed level, if any.
    pub fn last_completed(&self) -> Option<Level> {
        Level::all().rev().find(|l| self.is_complete(*l))
    }

    pub fn has_any(&self) -> bool {
        self.last_completed().is_some()
    }

    /// The hunt counts as finished once the last level is solved.
    pub fn is_finished(&self) -> bool {
        self.is_complete(Level::LAST)
    }
}

/// Persists `Progress` under a fixed key.
///
/// `load` and `save` never fail: storage problems are logged and the
/// in-memory value stays authoritative for the session. The `try_*`
/// variants expose the underlying errors.
#[derive(Clone, Debug)]
pub struct ProgressStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> ProgressStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read the stored blob; `Ok(None)` if nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend fails or the blob is not valid progress JSON.
    pub fn try_load(&self) -> Result<Option<Progress>, StorageError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(StorageError::Decode)
    }

    /// Stored progress, or all-false defaults on absence or failure.
    pub fn load(&self) -> Progress {
        match self.try_load() {
            Ok(Some(progress)) => progress,
            Ok(None) => Progress::default(),
            Err(err) => {
                log::error!("Error loading progress: {err}");
                Progress::default()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the backend write fails.
    pub fn try_save(&self, progress: &Progress) -> Result<(), StorageError> {
        let raw = serde_json::to_string(progress).map_err(StorageError::Encode)?;
        self.storage.set_item(&self.key, &raw)
    }

    pub fn save(&self, progress: &Progress) {
        if let Err(err) = self.try_save(progress) {
            log::error!("Error saving progress: {err}");
        }
    }

    /// Persist and return all-false progress.
    pub fn reset(&self) -> Progress {
        let progress = Progress::default();
        self.save(&progress);
        progress
    }
}
