//! File-based key-value store adapter.
//!
//! Entries live in a single JSON object at `<state_dir>/session.json`
//! (by default `~/.quizbank/session.json`). Every operation reads the file,
//! applies the change and writes it back.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::traits::KeyValueStore;

/// The default state directory name under the home directory.
pub const STATE_DIR: &str = ".quizbank";

/// The session file name.
const SESSION_FILE: &str = "session.json";

type Entries = BTreeMap<String, String>;

/// File-based key-value store.
///
/// Read failures behave like an empty store and write failures are logged,
/// so callers can treat the store as infallible.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    /// Create a store inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    /// Path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Entries {
        if !self.path.exists() {
            return Entries::new();
        }

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to open session file");
                return Entries::new();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Session file is not valid JSON, ignoring it");
                Entries::new()
            }
        }
    }

    fn save(&self, entries: &Entries) -> std::io::Result<()> {
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, entries)?;
        writer.flush()
    }

    fn update(&self, apply: impl FnOnce(&mut Entries)) {
        let mut entries = self.load();
        apply(&mut entries);
        if let Err(e) = self.save(&entries) {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to write session file");
        }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    fn set(&self, key: &str, value: &str) {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        });
    }

    fn remove(&self, key: &str) {
        self.update(|entries| {
            entries.remove(key);
        });
    }
}
