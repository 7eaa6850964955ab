//! Key-value storage backends.
//!
//! `BrowserStorage` wraps `window.localStorage`; `MemoryStorage` is an
//! in-process map for native hosts and tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsValue;

use crate::error::StorageError;

/// Minimal string key-value contract, shaped after the Web Storage API.
pub trait KeyValueStorage {
    /// Fetch a value; `Ok(None)` when the key was never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write (quota, access).
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Shared in-memory storage. Clones see the same entries, which lets tests
/// simulate a page reload by handing a clone to a fresh hunt.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent read fail with `StorageError::Unavailable`.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Make every subsequent write fail with `StorageError::Backend`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Raw peek at a stored value.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.get() {
            return Err(StorageError::Unavailable);
        }
        Ok(self.raw(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Backend("quota exceeded".into()));
        }
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// `window.localStorage`, or nothing when the browser refuses access.
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    /// Resolve local storage from the current window. Never fails; a missing
    /// store makes every operation return `StorageError::Unavailable`.
    pub fn from_window() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; progress will not survive reloads");
        }
        Self { storage }
    }

    fn store(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage.as_ref().ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.store()?.get_item(key).map_err(backend_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.store()?.set_item(key, value).map_err(backend_error)
    }
}

fn backend_error(err: JsValue) -> StorageError {
    StorageError::Backend(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
