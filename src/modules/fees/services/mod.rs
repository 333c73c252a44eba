pub mod fee_calculator;

pub use fee_calculator::{format_currency, FeeCalculator, STRIPE_FIXED_FEE, STRIPE_PERCENTAGE_FEE};
