use serde::{Deserialize, Serialize};

use crate::core::Cents;
use crate::modules::reports::models::ReportRange;

#[derive(Debug, Clone, Serialize)]
pub struct CustomerReport {
    pub range: ReportRange,
    pub total_customers: i64,
    pub previous_total_customers: i64,
    pub percentage_change: f64,
    pub new_customers: i64,
    pub returning_customers: i64,
    pub average_lifetime_value: Cents,
    pub repeat_rate: f64,
    pub top_customers: Vec<CustomerLifetime>,
    pub booking_frequency: Vec<FrequencyBucket>,
    pub geographic_distribution: Vec<LocationCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerLifetime {
    pub id: String,
    pub name: String,
    pub email: String,
    pub bookings: i64,
    /// Non-cancelled spend across every fetched booking
    pub lifetime_value: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyBucket {
    pub frequency: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub city: String,
    pub state: String,
    pub count: i64,
}
