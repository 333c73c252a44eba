use rust_decimal::Decimal;
use std::env;

use crate::core::{AppError, Result};
use crate::modules::fees::TierRateTable;

/// Reads platform fee rates, falling back to the default table per tier
pub fn tier_rates_from_env() -> Result<TierRateTable> {
    let defaults = TierRateTable::default();

    Ok(TierRateTable {
        free: rate_var("PLATFORM_FEE_RATE_FREE", defaults.free)?,
        pro: rate_var("PLATFORM_FEE_RATE_PRO", defaults.pro)?,
        platinum: rate_var("PLATFORM_FEE_RATE_PLATINUM", defaults.platinum)?,
    })
}

fn rate_var(name: &str, default: Decimal) -> Result<Decimal> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<Decimal>()
            .map_err(|_| AppError::configuration(format!("Invalid {}: {}", name, raw))),
        Err(_) => Ok(default),
    }
}
