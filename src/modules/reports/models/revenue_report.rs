use serde::{Deserialize, Serialize};

use crate::core::{Cents, Currency};
use crate::modules::fees::PricingTier;
use crate::modules::reports::models::{DailyAmount, ItemRevenue, ReasonCount, ReportRange};

/// Revenue over a window, compared against the window before it.
///
/// Cancelled bookings never count as revenue; they show up under `refunds`.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueReport {
    pub range: ReportRange,
    pub tier: PricingTier,
    pub total: Cents,
    pub previous_total: Cents,
    pub percentage_change: f64,
    pub by_day: Vec<DailyAmount>,
    pub by_item: Vec<ItemRevenue>,
    pub by_customer: Vec<CustomerRevenue>,
    pub by_payment_method: Vec<PaymentMethodTotal>,
    pub refunds: RefundSummary,
    /// Sum of per-booking platform fees at the tenant tier
    pub platform_fees: Cents,
    pub net_revenue: Cents,
    pub formatted: RevenueFormatted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRevenue {
    pub id: String,
    pub name: String,
    pub email: String,
    pub revenue: Cents,
    pub bookings: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodTotal {
    pub method: String,
    pub amount: Cents,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RefundSummary {
    pub total: Cents,
    pub count: i64,
    pub reasons: Vec<ReasonCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueFormatted {
    pub total: String,
    pub previous_total: String,
    pub platform_fees: String,
    pub net_revenue: String,
    pub refunds: String,
}

impl RevenueFormatted {
    pub fn new(
        currency: Currency,
        total: Cents,
        previous_total: Cents,
        platform_fees: Cents,
        net_revenue: Cents,
        refunds: Cents,
    ) -> Self {
        Self {
            total: currency.format_cents(total),
            previous_total: currency.format_cents(previous_total),
            platform_fees: currency.format_cents(platform_fees),
            net_revenue: currency.format_cents(net_revenue),
            refunds: currency.format_cents(refunds),
        }
    }
}
