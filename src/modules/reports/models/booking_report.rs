use serde::{Deserialize, Serialize};

use crate::core::Cents;
use crate::modules::bookings::BookingStatus;
use crate::modules::reports::models::{DailyCount, ReasonCount, ReportRange};

/// Booking volume over a window.
///
/// `by_status` partitions `total`: every booking in the window, cancelled ones included.
#[derive(Debug, Clone, Serialize)]
pub struct BookingReport {
    pub range: ReportRange,
    pub total: i64,
    pub previous_total: i64,
    pub percentage_change: f64,
    pub by_status: Vec<StatusCount>,
    pub by_item: Vec<ItemBookings>,
    pub by_day: Vec<DailyCount>,
    pub average_duration_hours: f64,
    pub cancellation_rate: f64,
    pub cancellation_reasons: Vec<ReasonCount>,
    pub busiest_days: Vec<WeekdayCount>,
    pub busiest_hours: Vec<HourCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: BookingStatus,
    pub count: i64,
    /// Sum of `total_price` of bookings in this status
    pub value: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBookings {
    pub name: String,
    pub bookings: i64,
    pub revenue: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayCount {
    pub day: String,
    pub bookings: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourCount {
    pub hour: u32,
    pub bookings: i64,
}

impl BookingReport {
    pub fn status_count(&self, status: BookingStatus) -> i64 {
        self.by_status
            .iter()
            .find(|s| s.status == status)
            .map(|s| s.count)
            .unwrap_or(0)
    }
}
