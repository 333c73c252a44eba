use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AppError, Result};

/// Subscription plan of a tenant; decides the platform fee rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingTier {
    Free,
    Pro,
    Platinum,
}

impl PricingTier {
    pub const ALL: [PricingTier; 3] = [PricingTier::Free, PricingTier::Pro, PricingTier::Platinum];

    pub fn as_str(&self) -> &'static str {
        match self {
            PricingTier::Free => "free",
            PricingTier::Pro => "pro",
            PricingTier::Platinum => "platinum",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PricingTier::Free => "Free",
            PricingTier::Pro => "Pro",
            PricingTier::Platinum => "Platinum",
        }
    }
}

impl fmt::Display for PricingTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PricingTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "free" => Ok(PricingTier::Free),
            "pro" => Ok(PricingTier::Pro),
            "platinum" => Ok(PricingTier::Platinum),
            _ => Err(AppError::invalid_tier(s)),
        }
    }
}

/// Platform fee rate per tier, as a fraction of the booking subtotal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRateTable {
    pub free: Decimal,
    pub pro: Decimal,
    pub platinum: Decimal,
}

impl Default for TierRateTable {
    fn default() -> Self {
        Self {
            free: Decimal::new(6, 2),      // 6%
            pro: Decimal::new(35, 3),      // 3.5%
            platinum: Decimal::new(1, 2),  // 1%
        }
    }
}

impl TierRateTable {
    pub fn rate(&self, tier: PricingTier) -> Decimal {
        match tier {
            PricingTier::Free => self.free,
            PricingTier::Pro => self.pro,
            PricingTier::Platinum => self.platinum,
        }
    }

    /// Rates must be fractions in `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        for tier in PricingTier::ALL {
            let rate = self.rate(tier);
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(AppError::configuration(format!(
                    "Platform fee rate for {} must be between 0 and 1, got {}",
                    tier, rate
                )));
            }
        }
        Ok(())
    }

    pub fn config(&self, tier: PricingTier) -> PlatformFeeConfig {
        let rate = self.rate(tier);
        let percent = (rate * Decimal::ONE_HUNDRED).normalize();

        PlatformFeeConfig {
            tier,
            rate,
            description: format!("{} tier - {}% platform fee", tier.label(), percent),
        }
    }

    pub fn configs(&self) -> Vec<PlatformFeeConfig> {
        PricingTier::ALL.iter().map(|tier| self.config(*tier)).collect()
    }
}

/// Rate and human description of a tier's platform fee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformFeeConfig {
    pub tier: PricingTier,
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    pub description: String,
}
