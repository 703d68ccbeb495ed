// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! JSON file backed storage

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};

use super::Storage;
use crate::error::{Error, ErrorContext, Result};

/// Persistent storage kept as a single JSON object on disk
///
/// Reads go back to the file, so writes made by another handle or process are
/// seen on the next lookup. The whole map is rewritten on every mutation and
/// the in-memory snapshot only changes once the write has succeeded. A missing
/// file reads as empty storage and is created on the first write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RwLock<HashMap<String, String>>,
    // Serialises read-modify-write cycles within this process
    writer: Mutex<()>,
}

impl FileStorage {
    /// Open storage at `path`, loading existing contents
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let items = load(&path)?;

        tracing::debug!(path = %path.display(), keys = items.len(), "Opened storage");

        Ok(Self {
            path,
            items: RwLock::new(items),
            writer: Mutex::new(()),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current file contents, or the last good snapshot if the file is unreadable
    fn current(&self) -> HashMap<String, String> {
        match load(&self.path) {
            Ok(items) => {
                *self.items.write() = items.clone();
                items
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to reload storage, using last snapshot");
                self.items.read().clone()
            }
        }
    }

    fn persist(&self, items: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_vec_pretty(items)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).context("writing storage")?;
        fs::rename(&tmp, &self.path).context("replacing storage")?;
        Ok(())
    }

    fn mutate<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _writer = self.writer.lock();
        let mut next = self.current();
        f(&mut next);
        self.persist(&next)?;
        *self.items.write() = next;
        Ok(())
    }
}

fn load(path: &Path) -> Result<HashMap<String, String>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(e) => return Err(e.into()),
    };
    if raw.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_json::from_str(&raw).map_err(|e| Error::storage(format!("{}: {}", path.display(), e)))
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.current().remove(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.mutate(|items| {
            items.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.mutate(|items| {
            items.remove(key);
        })
    }

    fn clear(&self) -> Result<()> {
        self.mutate(HashMap::clear)
    }

    fn len(&self) -> usize {
        self.current().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("storage.json")).unwrap();
        assert!(storage.is_empty());
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("jtck", "token-value").unwrap();
        storage.set_item("other", "x").unwrap();
        storage.remove_item("other").unwrap();

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("jtck").as_deref(), Some("token-value"));
        assert!(reopened.get_item("other").is_none());

        reopened.clear().unwrap();
        assert!(FileStorage::open(&path).unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileStorage::open(&path), Err(Error::Storage(_))));
    }

    #[test]
    fn test_sees_writes_from_other_handles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let client_side = FileStorage::open(&path).unwrap();
        let login_side = FileStorage::open(&path).unwrap();
        assert!(client_side.get_item("jtck").is_none());

        login_side.set_item("jtck", "fresh").unwrap();
        assert_eq!(client_side.get_item("jtck").as_deref(), Some("fresh"));

        client_side.set_item("theme", "dark").unwrap();
        assert_eq!(login_side.len(), 2);

        login_side.remove_item("jtck").unwrap();
        assert!(client_side.get_item("jtck").is_none());
        assert_eq!(client_side.get_item("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set_item("jtck", "token").unwrap();

        // A directory in place of the file makes the rename fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(storage.remove_item("jtck").is_err());
        assert_eq!(storage.get_item("jtck").as_deref(), Some("token"));
    }
}
