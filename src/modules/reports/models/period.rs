use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::core::dates::{end_of_day, parse_instant};
use crate::core::{AppError, Result};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Longest window a report may cover, in calendar days
pub const MAX_RANGE_DAYS: i64 = 3 * 366;

/// Inclusive reporting window over booking `created_at`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Both bounds were given as calendar dates
    #[serde(skip)]
    date_based: bool,
}

impl ReportRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(AppError::invalid_argument(format!(
                "startDate ({}) must be before or equal to endDate ({})",
                start.to_rfc3339(),
                end.to_rfc3339()
            )));
        }
        let days = (end.date_naive() - start.date_naive()).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(AppError::invalid_argument(format!(
                "Report range covers {} days, at most {} are allowed",
                days, MAX_RANGE_DAYS
            )));
        }
        Ok(Self {
            start,
            end,
            date_based: false,
        })
    }

    /// Builds a range from raw query values.
    ///
    /// A date-only `end` covers that whole day. Missing or blank bounds are a
    /// `MissingRange` error, unparseable ones an `InvalidArgument`.
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> Result<Self> {
        let (start_raw, end_raw) = match (start, end) {
            (Some(s), Some(e)) if !s.trim().is_empty() && !e.trim().is_empty() => (s, e),
            _ => return Err(AppError::MissingRange),
        };

        let start = parse_instant(start_raw).ok_or_else(|| {
            AppError::invalid_argument(format!("Invalid startDate: '{}'", start_raw))
        })?;
        let end = parse_instant(end_raw).ok_or_else(|| {
            AppError::invalid_argument(format!("Invalid endDate: '{}'", end_raw))
        })?;

        let end_instant = if end.date_only {
            end_of_day(end.instant)
        } else {
            end.instant
        };

        let mut range = Self::new(start.instant, end_instant)?;
        range.date_based = start.date_only && end.date_only;
        Ok(range)
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// `ceil((end − start) / 1 day)`
    pub fn period_days(&self) -> i64 {
        let millis = (self.end - self.start).num_milliseconds();
        (millis + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY)
    }

    /// Window of equal length immediately before this one:
    /// `[start − period_days, start − 1 day]`.
    ///
    /// For date-based ranges the closing day is covered whole, like `end` is.
    /// The result is empty (start after end) for a zero-length range.
    pub fn previous(&self) -> ReportRange {
        let start = self.start - Duration::days(self.period_days());
        let day_before = self.start - Duration::days(1);
        let end = if self.date_based {
            end_of_day(day_before)
        } else {
            day_before
        };

        ReportRange {
            start,
            end,
            date_based: self.date_based,
        }
    }

    /// Every UTC calendar day touched by the window, in order
    pub fn days(&self) -> Vec<NaiveDate> {
        let first = self.start.date_naive();
        let last = self.end.date_naive();
        first.iter_days().take_while(|d| *d <= last).collect()
    }

    pub fn total_days(&self) -> i64 {
        (self.end.date_naive() - self.start.date_naive()).num_days() + 1
    }
}
