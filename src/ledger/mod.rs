//! Date bucketing, statistics and the running total over persisted entries.

pub mod calendar;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod locale;
pub mod stats;

pub use calendar::{
    previous_month_start, resolve_local, until_next_midnight, until_next_midnight_in,
};
pub use ledger::{fold_net_worth, parse_amount, validate_input, Ledger, Recorded};
pub use locale::LocaleFormat;
pub use stats::MonthlyStats;
