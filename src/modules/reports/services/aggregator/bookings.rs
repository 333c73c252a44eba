use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{Datelike, NaiveDate, Timelike, Weekday};

use crate::core::dates::day_key;
use crate::core::money::{add_cents, percentage_change, round_to};
use crate::core::{Cents, Result};
use crate::modules::bookings::{Booking, BookingStatus};
use crate::modules::reports::models::{
    BookingReport, DailyCount, HourCount, ItemBookings, ReportRange, StatusCount, WeekdayCount,
};

use super::{cancellation_reasons, in_window, Grouped, ReportAggregator, TOP_N};

/// Hours of the day reported in `busiest_hours`
const BUSINESS_HOURS: std::ops::RangeInclusive<u32> = 8..=20;

#[derive(Default)]
struct StatusTally {
    status: Option<BookingStatus>,
    count: i64,
    value: Cents,
}

#[derive(Default)]
struct ItemTally {
    name: String,
    bookings: i64,
    revenue: Cents,
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl ReportAggregator {
    pub fn bookings(&self, bookings: &[Booking], range: &ReportRange) -> Result<BookingReport> {
        let current = in_window(bookings, range);
        let previous = in_window(bookings, &range.previous());

        let total = current.len() as i64;
        let previous_total = previous.len() as i64;

        let mut statuses: Grouped<StatusTally> = Grouped::new();
        for booking in &current {
            let tally = statuses.entry(booking.status.as_str());
            tally.status = Some(booking.status);
            tally.count += 1;
            tally.value = add_cents(tally.value, booking.total_price)?;
        }
        let by_status = statuses
            .into_entries()
            .into_iter()
            .filter_map(|(_, t)| {
                t.status.map(|status| StatusCount {
                    status,
                    count: t.count,
                    value: t.value,
                })
            })
            .collect();

        let mut items: Grouped<ItemTally> = Grouped::new();
        for booking in &current {
            let mut seen = HashSet::new();
            for item in &booking.items {
                let key = item.item_id.as_deref().unwrap_or(item.label.as_str());
                if !seen.insert(key) {
                    continue;
                }
                let tally = items.entry(key);
                if tally.bookings == 0 {
                    tally.name = item.label.clone();
                }
                tally.bookings += 1;
                if !booking.is_cancelled() {
                    tally.revenue = add_cents(tally.revenue, booking.total_price)?;
                }
            }
        }
        let mut by_item: Vec<ItemBookings> = items
            .into_entries()
            .into_iter()
            .map(|(_, t)| ItemBookings {
                name: t.name,
                bookings: t.bookings,
                revenue: t.revenue,
            })
            .collect();
        by_item.sort_by(|a, b| b.bookings.cmp(&a.bookings));
        by_item.truncate(TOP_N);

        let mut daily: HashMap<NaiveDate, i64> = HashMap::new();
        for booking in &current {
            *daily.entry(booking.created_at.date_naive()).or_insert(0) += 1;
        }
        let by_day = range
            .days()
            .into_iter()
            .map(|day| DailyCount {
                bookings: daily.get(&day).copied().unwrap_or(0),
                date: day_key(day),
            })
            .collect();

        let durations: Vec<f64> = current
            .iter()
            .filter_map(|b| b.rental_window())
            .map(|(start, end)| (end - start).num_seconds() as f64 / 3600.0)
            .collect();
        let average_duration_hours = if durations.is_empty() {
            0.0
        } else {
            round_to(durations.iter().sum::<f64>() / durations.len() as f64, 1)
        };

        let cancelled_count = current.iter().filter(|b| b.is_cancelled()).count() as i64;
        let cancellation_rate = if total > 0 {
            round_to(cancelled_count as f64 / total as f64 * 100.0, 2)
        } else {
            0.0
        };

        let mut weekdays: Grouped<i64> = Grouped::new();
        for booking in &current {
            *weekdays.entry(weekday_name(booking.created_at.weekday())) += 1;
        }
        let mut busiest_days: Vec<WeekdayCount> = weekdays
            .into_entries()
            .into_iter()
            .map(|(day, bookings)| WeekdayCount { day, bookings })
            .collect();
        busiest_days.sort_by(|a, b| b.bookings.cmp(&a.bookings));

        let mut hours: BTreeMap<u32, i64> = BTreeMap::new();
        for booking in &current {
            *hours.entry(booking.created_at.hour()).or_insert(0) += 1;
        }
        let busiest_hours = hours
            .into_iter()
            .filter(|(hour, _)| BUSINESS_HOURS.contains(hour))
            .map(|(hour, bookings)| HourCount { hour, bookings })
            .collect();

        Ok(BookingReport {
            range: *range,
            total,
            previous_total,
            percentage_change: percentage_change(total, previous_total),
            by_status,
            by_item,
            by_day,
            average_duration_hours,
            cancellation_rate,
            cancellation_reasons: cancellation_reasons(&current),
            busiest_days,
            busiest_hours,
        })
    }
}
