use std::{path::PathBuf, sync::Arc};

use tracing::info;

use crate::config::{Config, ConfigManager};
use crate::core::clock::{Clock, SystemClock};
use crate::core::utils::{ensure_dir, PathResolver};
use crate::errors::Result;
use crate::ledger::{Ledger, LocaleFormat};
use crate::scheduler::RolloverScheduler;
use crate::storage::{JsonEntryStore, JsonStateFile, StoreError};

/// Everything one user's ledger needs, opened once and passed explicitly to callers.
pub struct Session {
    config: Config,
    locale: LocaleFormat,
    base_dir: PathBuf,
    entries: Arc<JsonEntryStore>,
    state: Arc<JsonStateFile>,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// Loads the saved config from the default location and opens the session with it.
    pub fn open_default() -> Result<Self> {
        let config = ConfigManager::new()?.load()?;
        Self::open(config)
    }

    pub fn open(config: Config) -> Result<Self> {
        Self::open_with_clock(config, Arc::new(SystemClock))
    }

    /// Opens the entry store under the configured data directory.
    ///
    /// A failure here is fatal for the session: no other operation can work without the store.
    pub fn open_with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let locale = config.locale_format()?;
        let base_dir = PathResolver::resolve_base(config.data_dir.clone());
        ensure_dir(&base_dir).map_err(|source| StoreError::Open {
            path: base_dir.clone(),
            source,
        })?;
        let entries = JsonEntryStore::open(PathResolver::entries_file_in(&base_dir))?;
        let state = JsonStateFile::new(PathResolver::state_file_in(&base_dir));
        info!(
            base_dir = %base_dir.display(),
            locale = locale.tag(),
            "session opened"
        );
        Ok(Self {
            config,
            locale,
            base_dir,
            entries: Arc::new(entries),
            state: Arc::new(state),
            clock,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn locale(&self) -> LocaleFormat {
        self.locale
    }

    pub fn base_dir(&self) -> &std::path::Path {
        &self.base_dir
    }

    pub fn store(&self) -> &JsonEntryStore {
        &self.entries
    }

    pub fn ledger(&self) -> Ledger<'_> {
        Ledger::new(
            self.entries.as_ref(),
            self.clock.as_ref(),
            self.locale,
            self.config.opening_balance,
        )
    }

    /// A scheduler sharing this session's state file and clock.
    pub fn scheduler(&self) -> RolloverScheduler {
        RolloverScheduler::new(self.state.clone(), self.clock.clone(), self.locale)
    }
}
