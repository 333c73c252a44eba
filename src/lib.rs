//! Platform fee engine and booking reports for a multi-tenant rental service.
//!
//! Fees are computed in integer cents. Reports are aggregated in memory from
//! bookings fetched per request from the rb-payload booking service.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::bookings;
pub use modules::fees;
pub use modules::reports;
