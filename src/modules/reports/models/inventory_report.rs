use serde::{Deserialize, Serialize};

use crate::core::Cents;
use crate::modules::reports::models::ReportRange;

/// Utilization of catalogue items over a window
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    pub range: ReportRange,
    pub total_days: i64,
    pub utilization_by_item: Vec<ItemUtilization>,
    pub top_items: Vec<ItemUtilization>,
    pub bottom_items: Vec<ItemUtilization>,
    pub availability: Vec<ItemAvailability>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemUtilization {
    pub id: String,
    pub name: String,
    /// Distinct days inside the window covered by at least one booking
    pub booked_days: i64,
    /// `booked_days / total_days × 100`
    pub utilization_rate: f64,
    pub revenue: Cents,
    pub bookings: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAvailability {
    pub item: String,
    pub available_days: i64,
    pub total_days: i64,
}
