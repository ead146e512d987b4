use std::time::Duration;

use chrono::{
    DateTime, Datelike, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, TimeDelta, TimeZone,
};

const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);
/// Longest clock jump a midnight can fall into.
const MAX_SKIPPED_MINUTES: i64 = 2 * 60;

/// First day of the month before the one containing `date`.
///
/// Stepping from the first of the month keeps the result inside the previous month even when
/// `date` falls on a day the previous month lacks (March 31 -> February).
pub fn previous_month_start(date: NaiveDate) -> NaiveDate {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    first.checked_sub_months(Months::new(1)).unwrap_or(first)
}

/// Real time left until the start of the next local calendar day. Never zero, at most a day
/// plus one clock shift.
pub fn until_next_midnight(now: NaiveDateTime) -> Duration {
    until_next_midnight_in(now, resolve_local)
}

/// Resolves a reading of the system's local clock. Ambiguous readings take the earlier instant.
pub fn resolve_local(local: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&local)
        .earliest()
        .map(|instant| instant.fixed_offset())
}

/// Same as [`until_next_midnight`] with `resolve` mapping local wall-clock readings to instants.
///
/// `resolve` returns `None` for readings skipped by a clock change. A skipped midnight resolves
/// to the first valid reading after it; if nothing resolves, the wall-clock gap is used.
pub fn until_next_midnight_in<F>(now: NaiveDateTime, resolve: F) -> Duration
where
    F: Fn(NaiveDateTime) -> Option<DateTime<FixedOffset>>,
{
    let Some(midnight) = now
        .date()
        .succ_opt()
        .and_then(|tomorrow| tomorrow.and_hms_opt(0, 0, 0))
    else {
        return ONE_DAY;
    };
    let start_of_day = (0..=MAX_SKIPPED_MINUTES)
        .map(|minutes| midnight + TimeDelta::minutes(minutes))
        .find_map(&resolve);
    let gap = match (resolve(now), start_of_day) {
        (Some(from), Some(to)) => to.signed_duration_since(from),
        _ => midnight - now,
    };
    gap.to_std()
        .ok()
        .filter(|left| !left.is_zero())
        .unwrap_or(ONE_DAY)
}


#[cfg(test)]
pub(crate) mod zones {
    use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

    /// America/New_York for 2024: 02:00 -> 03:00 on March 10, 02:00 -> 01:00 on November 3.
    pub(crate) fn new_york_2024(local: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
        let est = FixedOffset::west_opt(5 * 3600)?;
        let edt = FixedOffset::west_opt(4 * 3600)?;
        let spring = NaiveDate::from_ymd_opt(2024, 3, 10)?.and_hms_opt(2, 0, 0)?;
        let fall = NaiveDate::from_ymd_opt(2024, 11, 3)?.and_hms_opt(2, 0, 0)?;
        let offset = if local < spring {
            est
        } else if local < spring + TimeDelta::hours(1) {
            return None;
        } else if local < fall {
            edt
        } else {
            est
        };
        offset.from_local_datetime(&local).single()
    }
}
