pub mod payment_calculation;
pub mod pricing_tier;

pub use payment_calculation::PaymentCalculation;
pub use pricing_tier::{PlatformFeeConfig, PricingTier, TierRateTable};
