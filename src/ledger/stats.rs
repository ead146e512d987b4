use crate::domain::Entry;

/// Spending summary for one month label.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyStats {
    pub month: String,
    /// Sum of expense amounts in the month.
    pub total_spent: f64,
    /// Entries of either kind whose amount is strictly above the threshold.
    pub matching_entries: Vec<Entry>,
}

impl MonthlyStats {
    /// Buckets `entries` into the stats for `month`.
    ///
    /// `total_spent` only counts expenses while `matching_entries` keeps income too. Callers rely
    /// on this split, so it must not be "fixed" here.
    pub fn collect<'a, I>(month: &str, threshold: f64, entries: I) -> Self
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut total_spent = 0.0;
        let mut matching_entries = Vec::new();
        for entry in entries.into_iter().filter(|entry| entry.month == month) {
            if entry.is_expense() {
                total_spent += entry.amount;
            }
            if entry.amount > threshold {
                matching_entries.push(entry.clone());
            }
        }
        Self {
            month: month.to_string(),
            total_spent,
            matching_entries,
        }
    }
}
