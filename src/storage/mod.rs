pub mod json_backend;

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{Entry, Identifiable, NewEntry};

pub use json_backend::{JsonEntryStore, JsonStateFile, ENTRIES_SCHEMA_VERSION};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The collection could not be opened. Every later storage call depends on this succeeding.
    #[error("failed to open entry store at `{}`: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("entry store at `{}` is not valid JSON: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("entry store schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: u32, supported: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("entry store lock poisoned")]
    Poisoned,
}

/// Durable collection of entries keyed by a store-assigned, auto-incrementing id.
///
/// Each call is all-or-nothing: when it returns `Ok`, the change is on disk and visible to
/// every later call; when it returns `Err`, nothing changed.
pub trait EntryStore: Send + Sync {
    /// Persists `entry` under the next free id and returns the stored record.
    fn add(&self, entry: NewEntry) -> Result<Entry>;

    /// Like [`EntryStore::add`], also returning the collection as it stood right after the
    /// insert. Implementations that can be shared across threads must take both under one lock
    /// so no other write lands in between.
    fn add_with_snapshot(&self, entry: NewEntry) -> Result<(Entry, Vec<Entry>)> {
        let stored = self.add(entry)?;
        Ok((stored, self.list_all()?))
    }

    /// Every entry, in insertion order.
    fn list_all(&self) -> Result<Vec<Entry>>;

    /// Removes the entry with `id`. Returns `false` when no such entry exists.
    fn delete_by_id(&self, id: u64) -> Result<bool>;

    fn get(&self, id: u64) -> Result<Option<Entry>> {
        Ok(self.list_all()?.into_iter().find(|entry| entry.id() == id))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.list_all()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

/// Scalar persistence for the date the today-view was last reset.
pub trait ResetMarkerStore: Send + Sync {
    fn last_reset_date(&self) -> Result<Option<String>>;
    fn record_reset_date(&self, date: &str) -> Result<()>;
}
