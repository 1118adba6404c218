//! File-backed local storage with atomic writes.
//!
//! All keys live in one TOML table. Every write rewrites the whole file via
//! a temporary file and an atomic rename, under an exclusive lock.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use gosta_core::error::{GostaError, Result};
use gosta_core::storage::LocalStorage;

type Entries = BTreeMap<String, String>;

/// `LocalStorage` persisted to a single TOML file.
///
/// Provides:
/// - **Atomicity**: updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: a lock file serializes writers across processes
/// - **Durability**: explicit fsync before rename
///
/// A missing, empty or corrupt file reads as an empty store.
#[derive(Debug, Clone)]
pub struct FileLocalStorage {
    path: PathBuf,
}

impl FileLocalStorage {
    /// Creates a storage handle. The file is created on first write.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Entries {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Entries::new(),
        };

        if content.trim().is_empty() {
            return Entries::new();
        }

        match toml::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "[FileLocalStorage] Ignoring unreadable storage file {:?}: {}",
                    self.path,
                    e
                );
                Entries::new()
            }
        }
    }

    fn save(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string(entries)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    /// Load, modify and save under the exclusive lock.
    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        let _lock = FileLock::acquire(&self.path)?;
        let mut entries = self.load();
        f(&mut entries);
        self.save(&entries)
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| GostaError::io("Storage path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| GostaError::io("Storage path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

impl LocalStorage for FileLocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }

    fn set_many(&self, pairs: &[(&str, String)]) -> Result<()> {
        self.update(|entries| {
            for (key, value) in pairs {
                entries.insert((*key).to_string(), value.clone());
            }
        })
    }

    fn remove_many(&self, keys: &[&str]) -> Result<()> {
        self.update(|entries| {
            for key in keys {
                entries.remove(*key);
            }
        })
    }
}

/// Exclusive lock held for the duration of one update.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| GostaError::io(format!("Failed to acquire storage lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Best effort; the lock itself is released with the handle.
        let _ = fs::remove_file(&self.lock_path);
    }
}
