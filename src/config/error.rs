use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("unsupported locale `{0}`")]
    UnknownLocale(String),

    #[error("opening balance must be a finite number, got {0}")]
    InvalidOpeningBalance(f64),
}
