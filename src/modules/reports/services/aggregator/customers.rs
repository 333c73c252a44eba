use std::collections::{HashMap, HashSet};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::money::{add_cents, percentage_change, round_to, sum_cents};
use crate::core::{AppError, Cents, Result};
use crate::modules::bookings::{Booking, Customer};
use crate::modules::reports::models::{
    CustomerLifetime, CustomerReport, FrequencyBucket, LocationCount, ReportRange,
};

use super::{in_window, Grouped, ReportAggregator, TOP_N};

/// Entries kept in the geographic distribution
const TOP_LOCATIONS: usize = 5;

const FREQUENCY_BUCKETS: [&str; 5] = [
    "1 booking",
    "2 bookings",
    "3-5 bookings",
    "6-10 bookings",
    "10+ bookings",
];

fn frequency_bucket(bookings: i64) -> usize {
    match bookings {
        i64::MIN..=1 => 0,
        2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        _ => 4,
    }
}

fn distinct_customers<'a>(bookings: &[&'a Booking]) -> HashSet<&'a str> {
    bookings.iter().filter_map(|b| b.customer_id()).collect()
}

#[derive(Default)]
struct Lifetime {
    name: Option<String>,
    email: Option<String>,
    bookings: i64,
    value: Cents,
}

#[derive(Default)]
struct Location {
    city: String,
    state: String,
    count: i64,
}

impl ReportAggregator {
    /// Customer activity in `range` against the lifetime of every fetched booking.
    ///
    /// A customer is new when they have exactly one booking in the whole set.
    pub fn customers(
        &self,
        bookings: &[Booking],
        customers: &[Customer],
        range: &ReportRange,
    ) -> Result<CustomerReport> {
        let current = distinct_customers(&in_window(bookings, range));
        let previous = distinct_customers(&in_window(bookings, &range.previous()));

        let total_customers = current.len() as i64;
        let previous_total_customers = previous.len() as i64;

        let directory: HashMap<&str, &Customer> =
            customers.iter().map(|c| (c.id.as_str(), c)).collect();

        let mut lifetimes: Grouped<Lifetime> = Grouped::new();
        for booking in bookings {
            let Some(customer) = booking.customer.as_ref() else {
                continue;
            };
            let known = directory.get(customer.id.as_str());
            let entry = lifetimes.entry(&customer.id);
            if entry.bookings == 0 {
                entry.name = customer
                    .name
                    .clone()
                    .or_else(|| known.and_then(|c| c.name.clone()));
                entry.email = customer
                    .email
                    .clone()
                    .or_else(|| known.and_then(|c| c.email.clone()));
            }
            entry.bookings += 1;
            if !booking.is_cancelled() {
                entry.value = add_cents(entry.value, booking.total_price)?;
            }
        }
        let lifetimes: Vec<CustomerLifetime> = lifetimes
            .into_entries()
            .into_iter()
            .map(|(id, l)| CustomerLifetime {
                id,
                name: l.name.unwrap_or_else(|| "Unknown Customer".to_string()),
                email: l.email.unwrap_or_default(),
                bookings: l.bookings,
                lifetime_value: l.value,
            })
            .collect();

        let booking_counts: HashMap<&str, i64> = lifetimes
            .iter()
            .map(|l| (l.id.as_str(), l.bookings))
            .collect();
        let new_customers = current
            .iter()
            .filter(|id| booking_counts.get(*id).copied().unwrap_or(0) == 1)
            .count() as i64;
        let returning_customers = total_customers - new_customers;

        let average_lifetime_value = if lifetimes.is_empty() {
            0
        } else {
            let total = sum_cents(lifetimes.iter().map(|l| l.lifetime_value))?;
            (Decimal::from(total) / Decimal::from(lifetimes.len() as i64))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_i64()
                .ok_or_else(|| AppError::internal("Average lifetime value out of range"))?
        };

        let repeat_rate = if total_customers > 0 {
            round_to(returning_customers as f64 / total_customers as f64 * 100.0, 2)
        } else {
            0.0
        };

        let mut frequency = [0i64; FREQUENCY_BUCKETS.len()];
        for lifetime in &lifetimes {
            frequency[frequency_bucket(lifetime.bookings)] += 1;
        }
        let booking_frequency = FREQUENCY_BUCKETS
            .iter()
            .zip(frequency)
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| FrequencyBucket {
                frequency: label.to_string(),
                count,
            })
            .collect();

        let mut locations: Grouped<Location> = Grouped::new();
        for customer in customers {
            let Some(address) = customer.address.as_ref() else {
                continue;
            };
            let (Some(city), Some(state)) = (address.city.as_deref(), address.state.as_deref())
            else {
                continue;
            };
            if city.is_empty() || state.is_empty() {
                continue;
            }
            let entry = locations.entry(&format!("{}, {}", city, state));
            if entry.count == 0 {
                entry.city = city.to_string();
                entry.state = state.to_string();
            }
            entry.count += 1;
        }
        let mut geographic_distribution: Vec<LocationCount> = locations
            .into_entries()
            .into_iter()
            .map(|(_, l)| LocationCount {
                city: l.city,
                state: l.state,
                count: l.count,
            })
            .collect();
        geographic_distribution.sort_by(|a, b| b.count.cmp(&a.count));
        geographic_distribution.truncate(TOP_LOCATIONS);

        let mut top_customers = lifetimes;
        top_customers.sort_by(|a, b| b.lifetime_value.cmp(&a.lifetime_value));
        top_customers.truncate(TOP_N);

        Ok(CustomerReport {
            range: *range,
            total_customers,
            previous_total_customers,
            percentage_change: percentage_change(total_customers, previous_total_customers),
            new_customers,
            returning_customers,
            average_lifetime_value,
            repeat_rate,
            top_customers,
            booking_frequency,
            geographic_distribution,
        })
    }
}
