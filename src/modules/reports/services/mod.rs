pub mod aggregator;
pub mod report_service;

pub use aggregator::{ReportAggregator, TOP_N};
pub use report_service::ReportService;
