use serde::{Deserialize, Serialize};

use crate::core::Cents;

/// Number of cancellations (or refunds) attributed to one reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReasonCount {
    pub reason: String,
    pub count: i64,
}

/// Revenue credited to one service or rental item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRevenue {
    pub name: String,
    pub revenue: Cents,
    pub bookings: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAmount {
    /// `YYYY-MM-DD`
    pub date: String,
    pub amount: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub bookings: i64,
}
