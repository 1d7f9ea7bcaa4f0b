//! Due-date classification and display ordering.
//!
//! Every function here works on whole UTC days. A date string that cannot be
//! parsed is indistinguishable from a missing date: it gets the "No date"
//! label, the neutral badge and sorts after every dated task.
//!
//! ## Thresholds
//!
//! | days until due | label         | badge    |
//! |----------------|---------------|----------|
//! | none           | `No date`     | neutral  |
//! | `< 0`          | `Expired`     | critical |
//! | `0`            | `Today`       | warning  |
//! | `1`            | `Tomorrow`    | warning  |
//! | `> 1`          | `In N days`   | normal   |
//!
//! ```rust
//! use chrono::NaiveDate;
//! use duetask::libs::due::{days_until, due_label, DueBadge};
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
//! let days = days_until(Some("2024-03-11"), today);
//! assert_eq!(days, Some(1));
//! assert_eq!(due_label(days), "Tomorrow");
//! assert_eq!(DueBadge::from_days(days), DueBadge::Warning);
//! ```

use super::task::Task;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;
use std::fmt;

/// Parses a due date into its UTC calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps (reduced to the UTC day) and
/// offset-less `YYYY-MM-DDTHH:MM:SS` timestamps (read as UTC).
pub fn parse_due(date: Option<&str>) -> Option<NaiveDate> {
    let date = date.map(str::trim).filter(|d| !d.is_empty())?;

    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(day);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(date) {
        return Some(timestamp.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|timestamp| timestamp.date())
}

/// Today's calendar day in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Signed number of whole days from `today` until the due date.
pub fn days_until(date: Option<&str>, today: NaiveDate) -> Option<i64> {
    parse_due(date).map(|due| (due - today).num_days())
}

/// Same as [`days_until`] relative to the current UTC day.
pub fn days_until_now(date: Option<&str>) -> Option<i64> {
    days_until(date, today_utc())
}

pub fn due_label(days: Option<i64>) -> String {
    match days {
        None => "No date".to_string(),
        Some(d) if d < 0 => "Expired".to_string(),
        Some(0) => "Today".to_string(),
        Some(1) => "Tomorrow".to_string(),
        Some(d) => format!("In {} days", d),
    }
}

/// Severity bucket used to colour the due column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBadge {
    Neutral,
    Critical,
    Warning,
    Normal,
}

impl DueBadge {
    pub fn from_days(days: Option<i64>) -> Self {
        match days {
            None => DueBadge::Neutral,
            Some(d) if d < 0 => DueBadge::Critical,
            Some(d) if d <= 1 => DueBadge::Warning,
            Some(_) => DueBadge::Normal,
        }
    }

    /// prettytable style spec for this bucket.
    pub fn style(&self) -> &'static str {
        match self {
            DueBadge::Neutral => "",
            DueBadge::Critical => "Fr",
            DueBadge::Warning => "Fy",
            DueBadge::Normal => "Fb",
        }
    }
}

impl fmt::Display for DueBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DueBadge::Neutral => "neutral",
            DueBadge::Critical => "critical",
            DueBadge::Warning => "warning",
            DueBadge::Normal => "normal",
        };
        f.write_str(name)
    }
}

/// Soonest due first, dated before dateless, dateless tasks equal.
pub fn compare_by_due(a: &Task, b: &Task) -> Ordering {
    match (parse_due(a.date.as_deref()), parse_due(b.date.as_deref())) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort into display order.
pub fn sort_by_due(tasks: &mut [Task]) {
    tasks.sort_by(compare_by_due);
}
