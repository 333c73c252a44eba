use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::core::dates::day_key;
use crate::core::money::{add_cents, percentage_change, sum_cents};
use crate::core::{Cents, Currency, Result};
use crate::modules::bookings::Booking;
use crate::modules::fees::PricingTier;
use crate::modules::reports::models::{
    CustomerRevenue, DailyAmount, ItemRevenue, PaymentMethodTotal, RefundSummary,
    ReportRange, RevenueFormatted, RevenueReport,
};

use super::{cancellation_reasons, in_window, Grouped, ReportAggregator, TOP_N};

#[derive(Default)]
struct RevenueTally {
    name: String,
    revenue: Cents,
    bookings: i64,
}

impl RevenueTally {
    fn record(&mut self, amount: Cents) -> Result<()> {
        self.revenue = add_cents(self.revenue, amount)?;
        self.bookings += 1;
        Ok(())
    }
}

#[derive(Default)]
struct CustomerTally {
    name: String,
    email: String,
    revenue: Cents,
    bookings: i64,
}

fn revenue_of(bookings: &[&Booking]) -> Result<Cents> {
    sum_cents(
        bookings
            .iter()
            .filter(|b| !b.is_cancelled())
            .map(|b| b.total_price),
    )
}

impl ReportAggregator {
    pub fn revenue(
        &self,
        bookings: &[Booking],
        range: &ReportRange,
        tier: PricingTier,
        currency: Currency,
    ) -> Result<RevenueReport> {
        let current = in_window(bookings, range);
        let previous = in_window(bookings, &range.previous());

        let total = revenue_of(&current)?;
        let previous_total = revenue_of(&previous)?;

        let earning: Vec<&Booking> = current.iter().copied().filter(|b| !b.is_cancelled()).collect();

        let mut daily: HashMap<NaiveDate, Cents> = HashMap::new();
        for booking in &earning {
            let amount = daily.entry(booking.created_at.date_naive()).or_insert(0);
            *amount = add_cents(*amount, booking.total_price)?;
        }
        let by_day = range
            .days()
            .into_iter()
            .map(|day| DailyAmount {
                amount: daily.get(&day).copied().unwrap_or(0),
                date: day_key(day),
            })
            .collect();

        // Keyed by catalogue id; lines without one fall back to their label
        let mut items: Grouped<RevenueTally> = Grouped::new();
        for booking in &earning {
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
                tally.record(booking.total_price)?;
            }
        }
        let mut by_item: Vec<ItemRevenue> = items
            .into_entries()
            .into_iter()
            .map(|(_, t)| ItemRevenue {
                name: t.name,
                revenue: t.revenue,
                bookings: t.bookings,
            })
            .collect();
        by_item.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        by_item.truncate(TOP_N);

        let mut customers: Grouped<CustomerTally> = Grouped::new();
        for booking in &earning {
            let id = booking.customer_id().unwrap_or("unknown");
            let tally = customers.entry(id);
            if tally.bookings == 0 {
                let customer = booking.customer.as_ref();
                tally.name = customer
                    .and_then(|c| c.name.clone())
                    .unwrap_or_else(|| "Unknown Customer".to_string());
                tally.email = customer.and_then(|c| c.email.clone()).unwrap_or_default();
            }
            tally.revenue = add_cents(tally.revenue, booking.total_price)?;
            tally.bookings += 1;
        }
        let mut by_customer: Vec<CustomerRevenue> = customers
            .into_entries()
            .into_iter()
            .map(|(id, t)| CustomerRevenue {
                id,
                name: t.name,
                email: t.email,
                revenue: t.revenue,
                bookings: t.bookings,
            })
            .collect();
        by_customer.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        by_customer.truncate(TOP_N);

        let mut methods: Grouped<RevenueTally> = Grouped::new();
        for booking in &earning {
            methods
                .entry(booking.payment_method.as_deref().unwrap_or("unknown"))
                .record(booking.total_price)?;
        }
        let mut by_payment_method: Vec<PaymentMethodTotal> = methods
            .into_entries()
            .into_iter()
            .map(|(method, t)| PaymentMethodTotal {
                method,
                amount: t.revenue,
                count: t.bookings,
            })
            .collect();
        by_payment_method.sort_by(|a, b| b.amount.cmp(&a.amount));

        let cancelled: Vec<&Booking> = current.iter().copied().filter(|b| b.is_cancelled()).collect();
        let refunds = RefundSummary {
            total: sum_cents(cancelled.iter().map(|b| b.total_price))?,
            count: cancelled.len() as i64,
            reasons: cancellation_reasons(&cancelled),
        };

        let platform_fees = earning.iter().try_fold(0, |acc, b| {
            let fee = self.fees().calculate_platform_fee(b.total_price, tier)?;
            add_cents(acc, fee)
        })?;
        let net_revenue = total - platform_fees;

        Ok(RevenueReport {
            range: *range,
            tier,
            total,
            previous_total,
            percentage_change: percentage_change(total, previous_total),
            by_day,
            by_item,
            by_customer,
            by_payment_method,
            formatted: RevenueFormatted::new(
                currency,
                total,
                previous_total,
                platform_fees,
                net_revenue,
                refunds.total,
            ),
            refunds,
            platform_fees,
            net_revenue,
        })
    }
}
