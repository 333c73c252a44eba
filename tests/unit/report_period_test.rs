// Unit tests for report windows and their comparison period

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use rentfee::core::AppError;
use rentfee::reports::ReportRange;

#[test]
fn test_range_from_dates_is_inclusive() {
    let range = ReportRange::from_query(Some("2025-06-01"), Some("2025-06-02")).unwrap();

    assert!(range.contains(Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()));
    assert!(range.contains(Utc.with_ymd_and_hms(2025, 6, 2, 23, 59, 59).unwrap()));
    assert!(!range.contains(Utc.with_ymd_and_hms(2025, 6, 3, 0, 0, 0).unwrap()));
    assert_eq!(range.total_days(), 2);
}

#[test]
fn test_range_from_timestamps() {
    let range = ReportRange::from_query(
        Some("2025-06-01T12:00:00Z"),
        Some("2025-06-03T12:00:00.000Z"),
    )
    .unwrap();

    assert_eq!(range.period_days(), 2);
    assert!(!range.contains(Utc.with_ymd_and_hms(2025, 6, 3, 13, 0, 0).unwrap()));
    assert_eq!(range.days().len(), 3);
}

#[test]
fn test_missing_bound_is_missing_range() {
    assert!(matches!(
        ReportRange::from_query(Some("2025-06-01"), None),
        Err(AppError::MissingRange)
    ));
    assert!(matches!(
        ReportRange::from_query(None, None),
        Err(AppError::MissingRange)
    ));
}

#[test]
fn test_reversed_bounds_rejected() {
    let err = ReportRange::from_query(Some("2025-07-01"), Some("2025-06-01")).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[test]
fn test_multi_decade_range_rejected() {
    let err = ReportRange::from_query(Some("0001-01-01"), Some("9999-12-31")).unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));

    // three years is still a valid window
    let range = ReportRange::from_query(Some("2023-01-01"), Some("2025-12-31")).unwrap();
    assert_eq!(range.total_days(), 1096);
    assert_eq!(range.days().len(), 1096);
}

#[test]
fn test_previous_month() {
    let range = ReportRange::from_query(Some("2025-06-01"), Some("2025-06-30")).unwrap();
    let previous = range.previous();

    assert_eq!(previous.start, Utc.with_ymd_and_hms(2025, 5, 2, 0, 0, 0).unwrap());
    assert!(previous.contains(Utc.with_ymd_and_hms(2025, 5, 20, 10, 0, 0).unwrap()));
    assert!(previous.end < range.start);
}

proptest! {
    /// Property: the previous window never overlaps the current one
    #[test]
    fn prop_previous_window_precedes_range(
        offset_hours in 0i64..10_000i64,
        length_hours in 1i64..2_000i64,
    ) {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let start = base + Duration::hours(offset_hours);
        let range = ReportRange::new(start, start + Duration::hours(length_hours)).unwrap();

        let previous = range.previous();
        prop_assert!(previous.end < range.start);
        prop_assert_eq!(range.start - previous.start, Duration::days(range.period_days()));
    }

    /// Property: every day between the bounds is listed once, in order
    #[test]
    fn prop_days_cover_window(length_days in 0i64..400i64) {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let range = ReportRange::new(start, start + Duration::days(length_days)).unwrap();

        let days = range.days();
        prop_assert_eq!(days.len() as i64, range.total_days());
        prop_assert!(days.windows(2).all(|w| w[0] < w[1]));
    }
}
