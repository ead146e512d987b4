use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};
use tracing::{debug, error, info};

use crate::{
    core::utils::{ensure_dir, write_atomic},
    domain::{Entry, Identifiable, NewEntry},
};

use super::{EntryStore, ResetMarkerStore, Result, StoreError};

pub const ENTRIES_SCHEMA_VERSION: u32 = 1;
const FIRST_ID: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryFile {
    schema_version: u32,
    next_id: u64,
    #[serde(default)]
    entries: Vec<Entry>,
}

impl Default for EntryFile {
    fn default() -> Self {
        Self {
            schema_version: ENTRIES_SCHEMA_VERSION,
            next_id: FIRST_ID,
            entries: Vec::new(),
        }
    }
}

impl EntryFile {
    /// Keeps `next_id` ahead of every stored id even if the file was edited by hand.
    fn normalize(&mut self) {
        let floor = self
            .entries
            .iter()
            .map(|entry| entry.id + 1)
            .max()
            .unwrap_or(FIRST_ID);
        self.next_id = self.next_id.max(floor);
    }
}

/// Entry collection persisted as a single JSON document.
///
/// The document is read once at open and kept in memory; every mutation rewrites the file
/// atomically before it becomes visible.
#[derive(Debug)]
pub struct JsonEntryStore {
    path: PathBuf,
    contents: Mutex<EntryFile>,
}

impl JsonEntryStore {
    /// Opens the collection at `path`, creating an empty one on first run.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match load_or_create(&path) {
            Ok(contents) => {
                info!(
                    path = %path.display(),
                    entries = contents.entries.len(),
                    next_id = contents.next_id,
                    "entry store opened"
                );
                Ok(Self {
                    path,
                    contents: Mutex::new(contents),
                })
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to open entry store");
                Err(err)
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, EntryFile>> {
        self.contents.lock().map_err(|_| StoreError::Poisoned)
    }

    fn persist(&self, contents: &EntryFile) -> Result<()> {
        let json = serde_json::to_string_pretty(contents)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    fn insert(&self, contents: &mut EntryFile, entry: NewEntry) -> Result<Entry> {
        let stored = entry.into_entry(contents.next_id);
        contents.entries.push(stored.clone());
        contents.next_id += 1;
        if let Err(err) = self.persist(contents) {
            contents.entries.pop();
            contents.next_id -= 1;
            error!(error = %err, "failed to add entry");
            return Err(err);
        }
        info!(id = stored.id, kind = %stored.kind, amount = stored.amount, "entry added");
        Ok(stored)
    }
}

impl EntryStore for JsonEntryStore {
    fn add(&self, entry: NewEntry) -> Result<Entry> {
        let mut contents = self.lock()?;
        self.insert(&mut contents, entry)
    }

    fn add_with_snapshot(&self, entry: NewEntry) -> Result<(Entry, Vec<Entry>)> {
        let mut contents = self.lock()?;
        let stored = self.insert(&mut contents, entry)?;
        Ok((stored, contents.entries.clone()))
    }

    fn list_all(&self) -> Result<Vec<Entry>> {
        let contents = self.lock()?;
        debug!(entries = contents.entries.len(), "listing entries");
        Ok(contents.entries.clone())
    }

    fn delete_by_id(&self, id: u64) -> Result<bool> {
        let mut contents = self.lock()?;
        let Some(index) = contents.entries.iter().position(|entry| entry.id() == id) else {
            debug!(id, "delete requested for unknown entry");
            return Ok(false);
        };
        let removed = contents.entries.remove(index);
        if let Err(err) = self.persist(&contents) {
            contents.entries.insert(index, removed);
            error!(id, error = %err, "failed to delete entry");
            return Err(err);
        }
        info!(id, "entry deleted");
        Ok(true)
    }

    fn get(&self, id: u64) -> Result<Option<Entry>> {
        let contents = self.lock()?;
        Ok(contents.entries.iter().find(|entry| entry.id() == id).cloned())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.lock()?.entries.len())
    }
}

fn load_or_create(path: &Path) -> Result<EntryFile> {
    let open_err = |source: std::io::Error| StoreError::Open {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        ensure_dir(parent).map_err(open_err)?;
    }
    if !path.exists() {
        let contents = EntryFile::default();
        let json = serde_json::to_string_pretty(&contents)?;
        write_atomic(path, &json).map_err(open_err)?;
        return Ok(contents);
    }
    let data = fs::read_to_string(path).map_err(open_err)?;
    let mut contents: EntryFile =
        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
    if contents.schema_version > ENTRIES_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchema {
            found: contents.schema_version,
            supported: ENTRIES_SCHEMA_VERSION,
        });
    }
    contents.normalize();
    Ok(contents)
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateRecord {
    #[serde(default)]
    last_reset_date: Option<String>,
}

/// Small JSON key-value file holding state that must survive restarts.
#[derive(Debug)]
pub struct JsonStateFile {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<StateRecord> {
        if !self.path.exists() {
            return Ok(StateRecord::default());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }
}

impl ResetMarkerStore for JsonStateFile {
    fn last_reset_date(&self) -> Result<Option<String>> {
        let _guard = self.guard.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_state()?.last_reset_date)
    }

    fn record_reset_date(&self, date: &str) -> Result<()> {
        let _guard = self.guard.lock().map_err(|_| StoreError::Poisoned)?;
        let mut state = self.read_state()?;
        state.last_reset_date = Some(date.to_string());
        let json = serde_json::to_string_pretty(&state)?;
        write_atomic(&self.path, &json)?;
        debug!(date, "reset date recorded");
        Ok(())
    }
}
