use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::ledger::LocaleFormat;

/// Stores user-configurable preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// BCP-47 style tag controlling how entry dates and times are stamped.
    pub locale: String,
    /// Currency code handed to renderers. The ledger itself is currency-agnostic.
    pub currency: String,
    /// Net worth before any recorded entry.
    #[serde(default)]
    pub opening_balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "INR".into(),
            opening_balance: 0.0,
            data_dir: None,
        }
    }
}

impl Config {
    pub fn locale_format(&self) -> Result<LocaleFormat, ConfigError> {
        LocaleFormat::from_tag(&self.locale)
            .ok_or_else(|| ConfigError::UnknownLocale(self.locale.clone()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.locale_format()?;
        if !self.opening_balance.is_finite() {
            return Err(ConfigError::InvalidOpeningBalance(self.opening_balance));
        }
        Ok(())
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    pub fn with_opening_balance(mut self, balance: f64) -> Self {
        self.opening_balance = balance;
        self
    }
}
