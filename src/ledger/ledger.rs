use tracing::{debug, info, warn};

use crate::core::clock::Clock;
use crate::domain::{Displayable, Entry, EntryKind, NewEntry};
use crate::errors::{Result, ValidationError};
use crate::ledger::calendar::previous_month_start;
use crate::ledger::locale::LocaleFormat;
use crate::ledger::stats::MonthlyStats;
use crate::storage::EntryStore;

/// Outcome of a successful [`Ledger::record_transaction`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub entry: Entry,
    /// Signed change applied to net worth.
    pub delta: f64,
    /// Net worth including the new entry.
    pub net_worth: f64,
}

/// Derived views and the running total over an [`EntryStore`].
pub struct Ledger<'a> {
    store: &'a dyn EntryStore,
    clock: &'a dyn Clock,
    locale: LocaleFormat,
    opening_balance: f64,
}

impl<'a> Ledger<'a> {
    pub fn new(
        store: &'a dyn EntryStore,
        clock: &'a dyn Clock,
        locale: LocaleFormat,
        opening_balance: f64,
    ) -> Self {
        Self {
            store,
            clock,
            locale,
            opening_balance,
        }
    }

    pub fn locale(&self) -> LocaleFormat {
        self.locale
    }

    /// Opening balance plus every persisted entry's signed amount.
    pub fn net_worth(&self) -> Result<f64> {
        let entries = self.store.list_all()?;
        Ok(fold_net_worth(self.opening_balance, &entries))
    }

    /// Validates the input, stamps it with the current local time and persists it.
    pub fn record_transaction(
        &self,
        kind: EntryKind,
        reason: &str,
        amount: f64,
    ) -> Result<Recorded> {
        if let Err(err) = validate_input(reason, amount) {
            warn!(%kind, error = %err, "rejected entry");
            return Err(err.into());
        }
        let stamp = self.locale.stamp(self.clock.now());
        let (entry, snapshot) = self
            .store
            .add_with_snapshot(NewEntry::new(stamp, kind, reason, amount))?;
        let net_worth = fold_net_worth(self.opening_balance, &snapshot);
        info!(entry = %entry.display_label(), net_worth, "transaction recorded");
        Ok(Recorded {
            delta: entry.delta(),
            entry,
            net_worth,
        })
    }

    /// Same as [`Ledger::record_transaction`] but takes raw text for the kind and amount.
    pub fn record_raw(&self, kind: &str, reason: &str, amount: &str) -> Result<Recorded> {
        let kind: EntryKind = kind.parse()?;
        let amount = parse_amount(amount)?;
        self.record_transaction(kind, reason, amount)
    }

    /// Removes the entry with `id`; `false` when it did not exist.
    pub fn delete_entry(&self, id: u64) -> Result<bool> {
        Ok(self.store.delete_by_id(id)?)
    }

    pub fn today_label(&self) -> String {
        self.locale.format_date(self.clock.today())
    }

    pub fn last_month_label(&self) -> String {
        self.locale.format_month(previous_month_start(self.clock.today()))
    }

    /// Entries stamped with today's date. Empty when there are none.
    pub fn entries_for_today(&self) -> Result<Vec<Entry>> {
        let today = self.today_label();
        let entries: Vec<Entry> = self
            .store
            .list_all()?
            .into_iter()
            .filter(|entry| entry.date == today)
            .collect();
        debug!(%today, count = entries.len(), "entries for today");
        Ok(entries)
    }

    pub fn entries_for_month(&self, month: &str) -> Result<Vec<Entry>> {
        Ok(self
            .store
            .list_all()?
            .into_iter()
            .filter(|entry| entry.month == month)
            .collect())
    }

    pub fn stats_for_month(&self, month: &str, threshold: f64) -> Result<MonthlyStats> {
        let entries = self.store.list_all()?;
        let stats = MonthlyStats::collect(month, threshold, &entries);
        debug!(
            month,
            threshold,
            total_spent = stats.total_spent,
            matches = stats.matching_entries.len(),
            "monthly stats"
        );
        Ok(stats)
    }

    /// Stats for the calendar month before the current one.
    pub fn stats_for_last_month(&self, threshold: f64) -> Result<MonthlyStats> {
        self.stats_for_month(&self.last_month_label(), threshold)
    }
}

pub fn fold_net_worth<'e, I>(opening_balance: f64, entries: I) -> f64
where
    I: IntoIterator<Item = &'e Entry>,
{
    entries
        .into_iter()
        .fold(opening_balance, |total, entry| total + entry.delta())
}

pub fn validate_input(reason: &str, amount: f64) -> std::result::Result<(), ValidationError> {
    if reason.trim().is_empty() {
        return Err(ValidationError::EmptyReason);
    }
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmount(amount.to_string()));
    }
    if amount <= 0.0 {
        return Err(ValidationError::NonPositiveAmount(amount));
    }
    Ok(())
}

/// Parses user-entered amount text. The whole trimmed string must be a finite number.
pub fn parse_amount(text: &str) -> std::result::Result<f64, ValidationError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidAmount(trimmed.to_string())),
    }
}
