//! The persisted income/expense record and its pre-insert form.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::domain::common::{Displayable, Identifiable};
use crate::errors::ValidationError;

/// Direction of money movement for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

impl EntryKind {
    /// Applies the kind's sign to a positive amount.
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            EntryKind::Income => amount,
            EntryKind::Expense => -amount,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Income => "income",
            EntryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(EntryKind::Income),
            "expense" => Ok(EntryKind::Expense),
            _ => Err(ValidationError::UnknownKind(value.to_string())),
        }
    }
}

/// Creation-time snapshot of the locale-formatted date, month and time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub date: String,
    pub month: String,
    pub time: String,
}

/// An entry that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub stamp: Stamp,
    pub kind: EntryKind,
    pub reason: String,
    pub amount: f64,
}

impl NewEntry {
    pub fn new(stamp: Stamp, kind: EntryKind, reason: impl Into<String>, amount: f64) -> Self {
        Self {
            stamp,
            kind,
            reason: reason.into(),
            amount,
        }
    }

    /// Attaches the key chosen by the store.
    pub fn into_entry(self, id: u64) -> Entry {
        Entry {
            id,
            date: self.stamp.date,
            month: self.stamp.month,
            time: self.stamp.time,
            kind: self.kind,
            reason: self.reason,
            amount: self.amount,
        }
    }
}

/// A persisted income or expense record. Never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: u64,
    pub date: String,
    pub month: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub reason: String,
    pub amount: f64,
}

impl Entry {
    /// Contribution of this entry to net worth.
    pub fn delta(&self) -> f64 {
        self.kind.signed(self.amount)
    }

    pub fn is_expense(&self) -> bool {
        self.kind == EntryKind::Expense
    }
}

impl Identifiable for Entry {
    fn id(&self) -> u64 {
        self.id
    }
}

impl Displayable for Entry {
    fn display_label(&self) -> String {
        format!(
            "#{} {} {}: {} of {} for {}",
            self.id,
            self.date,
            self.time,
            self.kind.as_str().to_uppercase(),
            self.amount,
            self.reason
        )
    }
}
