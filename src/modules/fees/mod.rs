pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::configure;
pub use models::{PaymentCalculation, PlatformFeeConfig, PricingTier, TierRateTable};
pub use services::{format_currency, FeeCalculator};
