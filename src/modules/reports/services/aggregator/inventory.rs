use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::NaiveDate;

use crate::core::money::{add_cents, round_to};
use crate::core::{Cents, Result};
use crate::modules::bookings::{Booking, CatalogueItem};
use crate::modules::reports::models::{
    InventoryReport, ItemAvailability, ItemUtilization, ReportRange,
};

use super::{in_window, ReportAggregator};

/// Entries kept in the top and bottom lists
const EDGE_ITEMS: usize = 3;

#[derive(Default)]
struct ItemUsage {
    booked_days: BTreeSet<NaiveDate>,
    revenue: Cents,
    bookings: i64,
}

impl ReportAggregator {
    /// Utilization of each catalogue item over `range`.
    ///
    /// Only non-cancelled bookings created in the window count. Their rental
    /// days are clipped to the window so `utilization_rate` never exceeds 100.
    pub fn inventory(
        &self,
        bookings: &[Booking],
        catalogue: &[CatalogueItem],
        range: &ReportRange,
    ) -> Result<InventoryReport> {
        let total_days = range.total_days();
        let first_day = range.start.date_naive();
        let last_day = range.end.date_naive();

        let mut usage: HashMap<&str, ItemUsage> = catalogue
            .iter()
            .map(|item| (item.id.as_str(), ItemUsage::default()))
            .collect();

        for booking in in_window(bookings, range) {
            if booking.is_cancelled() {
                continue;
            }

            let rented: Option<(NaiveDate, NaiveDate)> = booking
                .rental_window()
                .map(|(start, end)| (start.date_naive().max(first_day), end.date_naive().min(last_day)));

            let mut seen = HashSet::new();
            for item_id in booking.items.iter().filter_map(|i| i.item_id.as_deref()) {
                if !seen.insert(item_id) {
                    continue;
                }
                let Some(entry) = usage.get_mut(item_id) else {
                    continue;
                };
                entry.bookings += 1;
                entry.revenue = add_cents(entry.revenue, booking.total_price)?;
                if let Some((from, to)) = rented {
                    entry
                        .booked_days
                        .extend(from.iter_days().take_while(|d| *d <= to));
                }
            }
        }

        let mut utilization_by_item: Vec<ItemUtilization> = catalogue
            .iter()
            .filter_map(|item| {
                usage.remove(item.id.as_str()).map(|u| {
                    let booked_days = u.booked_days.len() as i64;
                    ItemUtilization {
                        id: item.id.clone(),
                        name: item.name.clone(),
                        booked_days,
                        utilization_rate: if total_days > 0 {
                            round_to(booked_days as f64 / total_days as f64 * 100.0, 2)
                        } else {
                            0.0
                        },
                        revenue: u.revenue,
                        bookings: u.bookings,
                    }
                })
            })
            .collect();
        utilization_by_item.sort_by(|a, b| b.booked_days.cmp(&a.booked_days));

        let with_bookings: Vec<&ItemUtilization> =
            utilization_by_item.iter().filter(|i| i.bookings > 0).collect();

        let top_items: Vec<ItemUtilization> = with_bookings
            .iter()
            .take(EDGE_ITEMS)
            .map(|i| (*i).clone())
            .collect();
        let bottom_items: Vec<ItemUtilization> = with_bookings
            .iter()
            .rev()
            .take(EDGE_ITEMS)
            .map(|i| (*i).clone())
            .collect();

        let availability = top_items
            .iter()
            .map(|i| ItemAvailability {
                item: i.name.clone(),
                available_days: total_days - i.booked_days,
                total_days,
            })
            .collect();

        Ok(InventoryReport {
            range: *range,
            total_days,
            utilization_by_item,
            top_items,
            bottom_items,
            availability,
        })
    }
}
