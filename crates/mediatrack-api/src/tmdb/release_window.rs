//! Release-date window for upcoming movies.

use chrono::{Datelike, Days, NaiveDate};

/// Inclusive `[start, end]` release-date range sent with upcoming-movie lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseWindow {
    /// First day (today).
    pub start: NaiveDate,
    /// Last day (same day-of-month next month, rolled forward on overflow).
    pub end: NaiveDate,
}

impl ReleaseWindow {
    /// Builds the one-month window starting at `today`.
    ///
    /// Returns `None` only if the end date falls outside chrono's range.
    #[must_use]
    pub fn starting(today: NaiveDate) -> Option<Self> {
        Some(Self {
            start: today,
            end: add_month_rolling(today)?,
        })
    }

    /// Query parameters (`primary_release_date.gte` / `.lte`).
    #[must_use]
    pub fn query(&self) -> [(&'static str, String); 2] {
        [
            (
                "primary_release_date.gte",
                self.start.format("%Y-%m-%d").to_string(),
            ),
            (
                "primary_release_date.lte",
                self.end.format("%Y-%m-%d").to_string(),
            ),
        ]
    }
}

/// Adds one calendar month, keeping the day-of-month.
///
/// When the next month is shorter, the excess days spill into the month
/// after it (Jan 31 -> Mar 2 in a leap year, Mar 3 otherwise).
#[must_use]
pub fn add_month_rolling(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year().checked_add(1)?, 1)
    } else {
        (date.year(), date.month().checked_add(1)?)
    };
    let first_of_next = NaiveDate::from_ymd_opt(year, month, 1)?;
    first_of_next.checked_add_days(Days::new(u64::from(date.day0())))
}
