// src/state_store.rs

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// External key-value collaborator for persisted form state.
pub trait StateStore {
    fn get(&self, key: &str) -> AppResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> AppResult<()>;
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// Namespaced key for one form's persisted state.
pub fn state_key(form_id: &str) -> String {
    format!("form-{form_id}")
}

// ------------------------------------------------------
// File-backed store (one <key>.json per key)
// ------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FileStateStore {
    root: PathBuf,
}

impl FileStateStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn key_path(&self, key: &str) -> AppResult<PathBuf> {
        validate_state_key(key).map_err(|_| AppError::InvalidStateKey)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    /// Existence check without reading the blob.
    pub fn contains(&self, key: &str) -> bool {
        self.key_path(key).map(|p| p.is_file()).unwrap_or(false)
    }
}

impl StateStore for FileStateStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::StoreReadFailed(e.to_string())),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.root).map_err(|e| AppError::StoreWriteFailed(e.to_string()))?;

        // Write-then-rename so a crash never leaves a half-written blob.
        let tmp = path.with_extension("json.tmp");
        {
            let mut out = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&tmp)
                .map_err(|e| AppError::StoreWriteFailed(e.to_string()))?;

            out.write_all(value.as_bytes())
                .map_err(|e| AppError::StoreWriteFailed(e.to_string()))?;

            let _ = out.flush();
            let _ = out.sync_all();
        }

        fs::rename(&tmp, &path).map_err(|e| AppError::StoreWriteFailed(e.to_string()))?;

        if let Some(parent) = path.parent() {
            if let Ok(dir) = OpenOptions::new().read(true).open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::StoreRemoveFailed(e.to_string())),
        }
    }
}

fn validate_state_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("empty");
    }

    if key == "." || key == ".." {
        return Err("reserved");
    }

    // Disallow path separators and NUL.
    if key.bytes().any(|b| b == b'/' || b == b'\\' || b == 0) {
        return Err("invalid_char");
    }

    // Reject ASCII control chars (0x00-0x1F) and DEL (0x7F).
    if key.bytes().any(|b| b < 0x20 || b == 0x7f) {
        return Err("invalid_char");
    }

    // Reject Windows-forbidden filename characters.
    if key
        .chars()
        .any(|c| matches!(c, '<' | '>' | ':' | '"' | '|' | '?' | '*'))
    {
        return Err("invalid_char");
    }

    // Windows disallows trailing dots/spaces in path components.
    if key.ends_with('.') || key.ends_with(' ') {
        return Err("invalid_char");
    }

    Ok(())
}

// ------------------------------------------------------
// In-memory store for unit tests
// ------------------------------------------------------

#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemStateStore {
    map: std::sync::Mutex<std::collections::BTreeMap<String, String>>,
}

#[cfg(test)]
impl StateStore for MemStateStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.map.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.map.lock().unwrap().remove(key);
        Ok(())
    }
}

// ------------------------------------------------------
// Unit Tests
// ------------------------------------------------------
