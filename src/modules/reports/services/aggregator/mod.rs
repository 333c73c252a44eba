//! Pure report aggregation over bookings already held in memory.
//!
//! Every report follows the same shape: filter by `created_at` into the current
//! and previous windows, group the current window by some key, and sum. Groups
//! keep first-appearance order so that stable sorts break ties by it.

mod bookings;
mod customers;
mod inventory;
mod revenue;

use std::collections::HashMap;

use crate::modules::bookings::Booking;
use crate::modules::fees::FeeCalculator;
use crate::modules::reports::models::{ReasonCount, ReportRange};

/// Entries kept in top-N lists
pub const TOP_N: usize = 10;

/// Builds the report models from booking lists
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    fees: FeeCalculator,
}

impl ReportAggregator {
    pub fn new(fees: FeeCalculator) -> Self {
        Self { fees }
    }

    pub fn fees(&self) -> &FeeCalculator {
        &self.fees
    }
}

/// Bookings whose `created_at` falls inside `range`
pub(crate) fn in_window<'a>(bookings: &'a [Booking], range: &ReportRange) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|b| range.contains(b.created_at))
        .collect()
}

/// Insertion-ordered grouping by string key
pub(crate) struct Grouped<V> {
    index: HashMap<String, usize>,
    entries: Vec<(String, V)>,
}

impl<V: Default> Grouped<V> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub(crate) fn entry(&mut self, key: &str) -> &mut V {
        let position = match self.index.get(key) {
            Some(position) => *position,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }

    pub(crate) fn into_entries(self) -> Vec<(String, V)> {
        self.entries
    }
}

/// Cancellations grouped by reason, bookings without one under "Other"
pub(crate) fn cancellation_reasons(bookings: &[&Booking]) -> Vec<ReasonCount> {
    let mut reasons: Grouped<i64> = Grouped::new();
    for booking in bookings.iter().filter(|b| b.is_cancelled()) {
        let reason = booking.cancellation_reason.as_deref().unwrap_or("Other");
        *reasons.entry(reason) += 1;
    }

    let mut reasons: Vec<ReasonCount> = reasons
        .into_entries()
        .into_iter()
        .map(|(reason, count)| ReasonCount { reason, count })
        .collect();
    reasons.sort_by(|a, b| b.count.cmp(&a.count));
    reasons
}
