pub mod booking_report;
pub mod breakdown;
pub mod customer_report;
pub mod inventory_report;
pub mod period;
pub mod revenue_report;

pub use booking_report::{BookingReport, HourCount, ItemBookings, StatusCount, WeekdayCount};
pub use breakdown::{DailyAmount, DailyCount, ItemRevenue, ReasonCount};
pub use customer_report::{CustomerLifetime, CustomerReport, FrequencyBucket, LocationCount};
pub use inventory_report::{InventoryReport, ItemAvailability, ItemUtilization};
pub use period::ReportRange;
pub use revenue_report::{
    CustomerRevenue, PaymentMethodTotal, RefundSummary, RevenueFormatted, RevenueReport,
};
