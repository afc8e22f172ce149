//! Storage backends for the progress document.
//!
//! A store only moves raw JSON text; decoding and self-healing live in
//! `progression::persistence`.

use crate::core::constants::SAVE_FILE_NAME;
use crate::core::error::{RealmsError, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Somewhere the progress document can be read from and written to.
pub trait ProgressStore {
    /// Returns `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored document. Either the whole document is written or
    /// the previous one is left in place.
    fn write(&mut self, contents: &str) -> Result<()>;
}

/// Platform data directory for the game (e.g. `~/.local/share/realms`), created if needed.
pub fn data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "realms").ok_or(RealmsError::NoDataDir)?;
    let dir = project_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// JSON file on disk, replaced atomically via a sibling temp file and rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `<dir>/progress.json`, creating `dir` if needed.
    pub fn in_dir(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(SAVE_FILE_NAME),
        })
    }

    /// Store in the configured directory, or the platform data dir.
    pub fn from_config(config: &crate::core::config::RealmsConfig) -> Result<Self> {
        match &config.save_dir {
            Some(dir) => Self::in_dir(dir),
            None => Self::in_dir(&data_dir()?),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl ProgressStore for FileStore {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        let temp = self.temp_path();
        fs::write(&temp, contents)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }
}

/// In-memory store for tests and simulations. Can be told to fail reads or
/// reject writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contents: Option<String>,
    fail_reads: bool,
    reject_writes: bool,
    writes: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Default::default()
        }
    }

    /// Make `read` fail with an IO error while leaving the contents in place.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes.
    pub fn writes(&self) -> u32 {
        self.writes
    }
}

impl ProgressStore for MemoryStore {
    fn read(&self) -> Result<Option<String>> {
        if self.fail_reads {
            return Err(std::io::Error::from(std::io::ErrorKind::Interrupted).into());
        }
        Ok(self.contents.clone())
    }

    fn write(&mut self, contents: &str) -> Result<()> {
        if self.reject_writes {
            return Err(RealmsError::WriteRejected("memory store is read-only".to_string()));
        }
        self.contents = Some(contents.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store_dir() -> PathBuf {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "realms-store-test-{}-{}",
            std::process::id(),
            test_id
        ))
    }

    #[test]
    fn test_file_store_missing_reads_none() {
        let dir = temp_store_dir();
        let store = FileStore::in_dir(&dir).unwrap();
        assert!(store.read().unwrap().is_none());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = temp_store_dir();
        let mut store = FileStore::in_dir(&dir).unwrap();
        store.write("{\"version\":1}").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("{\"version\":1}"));

        store.write("{\"version\":2}").unwrap();
        assert_eq!(store.read().unwrap().as_deref(), Some("{\"version\":2}"));
        assert!(!store.temp_path().exists());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_file_store_path() {
        let dir = temp_store_dir();
        let store = FileStore::in_dir(&dir).unwrap();
        assert!(store.path().ends_with(SAVE_FILE_NAME));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_memory_store_rejects_writes() {
        let mut store = MemoryStore::with_contents("old");
        store.set_reject_writes(true);
        assert!(store.write("new").is_err());
        assert_eq!(store.contents(), Some("old"));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_memory_store_counts_writes() {
        let mut store = MemoryStore::new();
        store.write("a").unwrap();
        store.write("b").unwrap();
        assert_eq!(store.writes(), 2);
        assert_eq!(store.read().unwrap().as_deref(), Some("b"));
    }

    #[test]
    fn test_memory_store_fails_reads() {
        let mut store = MemoryStore::with_contents("kept");
        store.set_fail_reads(true);
        assert!(matches!(store.read(), Err(RealmsError::Io(_))));
        assert_eq!(store.contents(), Some("kept"));
    }
}
