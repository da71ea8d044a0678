// File: src/credentials.rs
// Purpose: Key/value persistence for the auth token and signed-in user

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ApiError;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Opaque string storage injected into the auth session.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ApiError>;
    fn remove(&self, key: &str) -> Result<(), ApiError>;
}

/// Process-local store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> ApiError {
    ApiError::Storage("store lock poisoned".to_string())
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let entries = self.entries.lock().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        let mut entries = self.entries.lock().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<HashMap<String, String>, ApiError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| ApiError::Storage(e.to_string()))?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, entries: &HashMap<String, String>) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ApiError::Storage(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content).map_err(|e| ApiError::Storage(e.to_string()))
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApiError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), ApiError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(store: &dyn CredentialStore) {
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.set(TOKEN_KEY, "abc").unwrap();
        store.set(USER_KEY, "{}").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));

        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_memory_store() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn test_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.json");

        exercise(&FileStore::new(&path));

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(USER_KEY).unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStore::new(&path).get(TOKEN_KEY), Err(ApiError::Decode(_))));
    }
}
