use thiserror::Error;

use crate::config::ConfigError;
use crate::storage::StoreError;

/// Rejected user input. Nothing is persisted when this is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("reason must not be empty")]
    EmptyReason,
    #[error("amount `{0}` is not a number")]
    InvalidAmount(String),
    #[error("amount must be greater than zero, got {0}")]
    NonPositiveAmount(f64),
    #[error("unknown entry type `{0}`, expected `income` or `expense`")]
    UnknownKind(String),
}

/// Umbrella error returned by session and ledger operations.
#[derive(Debug, Error)]
pub enum NetworthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl NetworthError {
    /// True when the failure came from user input rather than storage or config.
    pub fn is_validation(&self) -> bool {
        matches!(self, NetworthError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, NetworthError>;
