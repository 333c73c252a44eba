use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// A parsed timestamp and whether the input carried only a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedInstant {
    pub instant: DateTime<Utc>,
    pub date_only: bool,
}

/// Parses RFC 3339 (`2025-06-01T14:00:00Z`) or a bare `YYYY-MM-DD` (midnight UTC)
pub fn parse_instant(raw: &str) -> Option<ParsedInstant> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(ParsedInstant {
            instant: dt.with_timezone(&Utc),
            date_only: false,
        });
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| ParsedInstant {
            instant: date.and_time(NaiveTime::MIN).and_utc(),
            date_only: true,
        })
}

/// Last representable instant of the UTC day containing `instant`
pub fn end_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    instant.date_naive().and_time(last).and_utc()
}

/// `YYYY-MM-DD` key of a calendar day
pub fn day_key(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}
