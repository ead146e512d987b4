use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::Stamp;

/// Locale conventions used to stamp entries with date, month and time strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LocaleFormat {
    /// `5/10/2024`, `2:30:05 PM`
    #[default]
    EnUs,
    /// `10/05/2024`, `14:30:05`
    EnGb,
    /// `10/5/2024`, `2:30:05 pm`
    EnIn,
}

impl LocaleFormat {
    /// Accepts `en-US`, `en_us` and similar spellings.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().replace('_', "-").to_ascii_lowercase().as_str() {
            "en-us" | "en" => Some(LocaleFormat::EnUs),
            "en-gb" => Some(LocaleFormat::EnGb),
            "en-in" => Some(LocaleFormat::EnIn),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            LocaleFormat::EnUs => "en-US",
            LocaleFormat::EnGb => "en-GB",
            LocaleFormat::EnIn => "en-IN",
        }
    }

    pub fn format_date(self, date: NaiveDate) -> String {
        let pattern = match self {
            LocaleFormat::EnUs => "%-m/%-d/%Y",
            LocaleFormat::EnGb => "%d/%m/%Y",
            LocaleFormat::EnIn => "%-d/%-m/%Y",
        };
        date.format(pattern).to_string()
    }

    /// Full month name and year, e.g. `May 2024`. Same for every supported locale.
    pub fn format_month(self, date: NaiveDate) -> String {
        date.format("%B %Y").to_string()
    }

    pub fn format_time(self, time: NaiveTime) -> String {
        let pattern = match self {
            LocaleFormat::EnUs => "%-I:%M:%S %p",
            LocaleFormat::EnGb => "%H:%M:%S",
            LocaleFormat::EnIn => "%-I:%M:%S %P",
        };
        time.format(pattern).to_string()
    }

    pub fn stamp(self, now: NaiveDateTime) -> Stamp {
        Stamp {
            date: self.format_date(now.date()),
            month: self.format_month(now.date()),
            time: self.format_time(now.time()),
        }
    }
}
