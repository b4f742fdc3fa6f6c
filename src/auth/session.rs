//! Persisted session record and the key-value store it lives in.
//!
//! The store trait is a minimal get/set/remove over one value, so any
//! device keychain can stand in. Production uses a JSON file under the
//! config dir; tests use the in-memory impl.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::models::role::Role;

/// Proof of a successful login, restored across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: i64,
    pub employee_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl SessionRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub trait SessionStore {
    /// Read the stored value. Unreadable or absent → None, never an error.
    fn get(&self) -> Option<String>;
    fn set(&self, value: &str) -> AppResult<()>;
    /// Remove the stored value. Idempotent.
    fn remove(&self) -> AppResult<()>;
}

pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
    }

    fn set(&self, value: &str) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, value)?;
        Ok(())
    }

    fn remove(&self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store used by the test suite.
#[derive(Default)]
pub struct MemorySessionStore {
    value: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.value.lock().ok()?.clone()
    }

    fn set(&self, value: &str) -> AppResult<()> {
        if let Ok(mut guard) = self.value.lock() {
            *guard = Some(value.to_string());
        }
        Ok(())
    }

    fn remove(&self) -> AppResult<()> {
        if let Ok(mut guard) = self.value.lock() {
            *guard = None;
        }
        Ok(())
    }
}
