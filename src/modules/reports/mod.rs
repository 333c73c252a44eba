pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{BookingReport, CustomerReport, InventoryReport, ReportRange, RevenueReport};
pub use services::{ReportAggregator, ReportService};
