//! Storage backends for the encoded save blob.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::atomic_write::atomic_write;
use crate::save_error::SaveError;

/// Environment variable overriding the save file location.
pub const SAVE_PATH_ENV: &str = "SKYLINE_SAVE_PATH";

/// Default save file name, relative to the working directory.
pub const DEFAULT_SAVE_PATH: &str = "skyline_save.bin";

/// Returns the save file path, honouring `SKYLINE_SAVE_PATH`.
pub fn save_file_path() -> PathBuf {
    std::env::var_os(SAVE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH))
}

/// Where a save blob lives. One blob per store; writes replace it.
pub trait SaveStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> Result<Option<Vec<u8>>, SaveError>;

    fn write(&self, bytes: &[u8]) -> Result<(), SaveError>;
}

/// A single file on disk, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store at [`save_file_path`].
    pub fn from_env() -> Self {
        Self::new(save_file_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn read(&self) -> Result<Option<Vec<u8>>, SaveError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<(), SaveError> {
        atomic_write(&self.path, bytes)?;
        Ok(())
    }
}

/// In-memory store for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bytes: Mutex<Option<Vec<u8>>>,
    writes: Mutex<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `bytes`, as if written by an earlier run.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Mutex::new(Some(bytes)),
            writes: Mutex::new(0),
        }
    }

    /// Number of successful writes since creation.
    pub fn write_count(&self) -> u64 {
        self.writes.lock().map(|w| *w).unwrap_or(0)
    }

    /// Copy of the currently stored blob.
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.bytes.lock().ok().and_then(|b| b.clone())
    }
}

fn poisoned() -> SaveError {
    SaveError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "memory store lock poisoned",
    ))
}

impl SaveStore for MemoryStore {
    fn read(&self) -> Result<Option<Vec<u8>>, SaveError> {
        Ok(self.bytes.lock().map_err(|_| poisoned())?.clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<(), SaveError> {
        *self.bytes.lock().map_err(|_| poisoned())? = Some(bytes.to_vec());
        *self.writes.lock().map_err(|_| poisoned())? += 1;
        Ok(())
    }
}
