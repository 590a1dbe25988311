//! File-backed store for sectioned key/value entries
//!
//! [`IniStore`] keeps the parsed entries in memory and writes them back
//! according to its [`UpdateMode`]:
//!
//! - `UpdateOnAction` rewrites the file after every mutation and re-reads the
//!   file before every value lookup.
//! - `UpdateOnDispose` only touches the file again when the store is closed
//!   (or flushed explicitly).
//!
//! Every persist is a full rewrite of the file followed by a re-parse, so the
//! in-memory entries always match what is on disk. Writes go straight to the
//! target file; a crash mid-write can leave it truncated.
//!
//! A store that is dropped without [`IniStore::close`] is closed on drop.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::format;
use crate::domain::{Entry, Value, MISSING_NUMBER};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store is already closed")]
    AlreadyClosed,

    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error accessing {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// When in-memory changes are written back to the file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Write after every mutation, re-read before every lookup
    #[default]
    UpdateOnAction,
    /// Write once, when the store is closed
    UpdateOnDispose,
}

impl UpdateMode {
    pub fn as_str(&self) -> &str {
        match self {
            UpdateMode::UpdateOnAction => "update_on_action",
            UpdateMode::UpdateOnDispose => "update_on_dispose",
        }
    }
}

/// Store over a single sectioned key/value file
#[derive(Debug)]
pub struct IniStore {
    path: PathBuf,
    entries: Vec<Entry>,
    mode: UpdateMode,
    dirty: bool,
    closed: bool,
}

impl IniStore {
    /// Opens the file at `path` in [`UpdateMode::UpdateOnAction`], creating it if missing
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open_with_mode(path, UpdateMode::default())
    }

    /// Opens the file at `path` with the given mode, creating it if missing
    pub fn open_with_mode(path: impl Into<PathBuf>, mode: UpdateMode) -> StoreResult<Self> {
        let path = path.into();

        if !path.exists() {
            debug!(path = %path.display(), "creating empty file");
            File::create(&path).map_err(|e| StoreError::io(&path, e))?;
        }

        let entries = read_entries(&path)?;
        debug!(
            path = %path.display(),
            entries = entries.len(),
            mode = mode.as_str(),
            "opened store"
        );

        Ok(Self {
            path,
            entries,
            mode,
            dirty: false,
            closed: false,
        })
    }

    /// Returns the path to the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    /// Changes the update mode; takes effect from the next operation
    pub fn set_mode(&mut self, mode: UpdateMode) {
        self.mode = mode;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns true if there are mutations not yet written to the file
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the cached entries in file order
    pub fn entries(&self) -> StoreResult<&[Entry]> {
        self.ensure_open()?;
        Ok(&self.entries)
    }

    /// Returns the distinct section names, in order of first appearance
    pub fn sections(&self) -> StoreResult<Vec<String>> {
        self.ensure_open()?;

        let mut sections: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !sections.iter().any(|s| s == entry.section()) {
                sections.push(entry.section().to_string());
            }
        }
        Ok(sections)
    }

    /// Returns the keys of `section`, in entry order
    pub fn keys(&self, section: &str) -> StoreResult<Vec<String>> {
        self.ensure_open()?;
        Ok(self
            .entries
            .iter()
            .filter(|e| e.section() == section)
            .map(|e| e.key().to_string())
            .collect())
    }

    /// Returns the value of `section`/`key` as text, or `None` if absent
    pub fn get_string(&mut self, section: &str, key: &str) -> StoreResult<Option<String>> {
        self.ensure_open()?;
        self.refresh_for_read()?;
        Ok(self.find(section, key).map(|e| e.value().to_string()))
    }

    /// Returns the value of `section`/`key` as a number
    ///
    /// Absent keys yield [`MISSING_NUMBER`]; values that are not numeric yield
    /// [`crate::domain::NOT_A_NUMBER`].
    pub fn get_number(&mut self, section: &str, key: &str) -> StoreResult<f64> {
        self.ensure_open()?;
        self.refresh_for_read()?;
        Ok(self
            .find(section, key)
            .map(Entry::to_number)
            .unwrap_or(MISSING_NUMBER))
    }

    /// Inserts or overwrites the value of `section`/`key`
    ///
    /// An existing entry keeps its position.
    pub fn set_value(
        &mut self,
        section: &str,
        key: &str,
        value: impl Into<Value>,
    ) -> StoreResult<&mut Self> {
        self.ensure_open()?;
        self.dirty = true;

        let (section, key) = (section.trim(), key.trim());
        match self.position(section, key) {
            Some(pos) => self.entries[pos].set_value(value),
            None => self.entries.push(Entry::new(section, key, value)),
        }

        self.persist_on_action()?;
        Ok(self)
    }

    /// Inserts `entry`, or replaces the stored entry with the same section/key in place
    pub fn set_entry(&mut self, entry: Entry) -> StoreResult<&mut Self> {
        self.ensure_open()?;
        self.dirty = true;

        match self.position(entry.section(), entry.key()) {
            Some(pos) => self.entries[pos] = entry,
            None => self.entries.push(entry),
        }

        self.persist_on_action()?;
        Ok(self)
    }

    /// Applies [`Self::set_entry`] to each entry in order
    pub fn set_entries<I>(&mut self, entries: I) -> StoreResult<&mut Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        self.ensure_open()?;
        self.dirty = true;

        for entry in entries {
            self.set_entry(entry)?;
        }
        Ok(self)
    }

    /// Removes every entry of `section`, returning how many were removed
    pub fn delete_section(&mut self, section: &str) -> StoreResult<usize> {
        self.ensure_open()?;
        self.dirty = true;

        let before = self.entries.len();
        self.entries.retain(|e| e.section() != section);
        let removed = before - self.entries.len();

        self.persist_on_action()?;
        Ok(removed)
    }

    /// Removes `section`/`key`, returning false if it was not present
    pub fn delete_key(&mut self, section: &str, key: &str) -> StoreResult<bool> {
        self.ensure_open()?;
        self.dirty = true;

        let Some(pos) = self.position(section, key) else {
            return Ok(false);
        };
        self.entries.remove(pos);

        self.persist_on_action()?;
        Ok(true)
    }

    /// Returns true if any entry belongs to `section`
    pub fn section_exists(&self, section: &str) -> StoreResult<bool> {
        self.ensure_open()?;
        Ok(self.entries.iter().any(|e| e.section() == section))
    }

    /// Returns true if `section`/`key` is present
    pub fn key_exists(&self, section: &str, key: &str) -> StoreResult<bool> {
        self.ensure_open()?;
        Ok(self.find(section, key).is_some())
    }

    /// Returns true if `section`/`key` is present and numeric
    pub fn is_number(&self, section: &str, key: &str) -> StoreResult<bool> {
        self.ensure_open()?;
        Ok(self.find(section, key).is_some_and(Entry::is_number))
    }

    /// Writes pending mutations to the file now, regardless of mode
    pub fn flush(&mut self) -> StoreResult<()> {
        self.ensure_open()?;
        if self.dirty {
            self.persist()?;
        }
        Ok(())
    }

    /// Writes pending mutations and closes the store
    ///
    /// Every later call, including a second `close`, fails with
    /// [`StoreError::AlreadyClosed`]. If the final write fails the store stays
    /// open.
    pub fn close(&mut self) -> StoreResult<()> {
        self.ensure_open()?;
        if self.dirty {
            self.persist()?;
        }

        self.entries.clear();
        self.closed = true;
        debug!(path = %self.path.display(), "closed store");
        Ok(())
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed {
            return Err(StoreError::AlreadyClosed);
        }
        Ok(())
    }

    fn find(&self, section: &str, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.matches(section, key))
    }

    fn position(&self, section: &str, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.matches(section, key))
    }

    /// In `UpdateOnAction` mode, lookups see the file, not the cache
    fn refresh_for_read(&mut self) -> StoreResult<()> {
        if self.mode == UpdateMode::UpdateOnAction {
            self.entries = read_entries(&self.path)?;
        }
        Ok(())
    }

    fn persist_on_action(&mut self) -> StoreResult<()> {
        if self.mode == UpdateMode::UpdateOnAction {
            self.persist()?;
        }
        Ok(())
    }

    /// Rewrites the whole file, then reloads the entries from it
    fn persist(&mut self) -> StoreResult<()> {
        let content = format::serialize(&self.entries);
        fs::write(&self.path, content).map_err(|e| StoreError::io(&self.path, e))?;
        self.dirty = false;

        self.entries = read_entries(&self.path)?;
        debug!(
            path = %self.path.display(),
            entries = self.entries.len(),
            "persisted store"
        );
        Ok(())
    }
}

impl Drop for IniStore {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(e) = self.close() {
            warn!(path = %self.path.display(), error = %e, "failed to close store on drop");
        }
    }
}

impl fmt::Display for IniStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl PartialEq for IniStore {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

/// Reads and parses the file at `path`
fn read_entries(path: &Path) -> StoreResult<Vec<Entry>> {
    let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
    let entries = format::parse(&String::from_utf8_lossy(&bytes));
    debug!(path = %path.display(), entries = entries.len(), "parsed file");
    Ok(entries)
}
