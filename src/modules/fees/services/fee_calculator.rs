use rust_decimal::Decimal;
use tracing::warn;

use crate::core::money::{apply_rate, ensure_non_negative};
use crate::core::{Cents, Currency, Result};
use crate::modules::fees::models::{
    PaymentCalculation, PlatformFeeConfig, PricingTier, TierRateTable,
};

/// Card processor percentage fee (2.9%)
pub const STRIPE_PERCENTAGE_FEE: Decimal = Decimal::from_parts(29, 0, 0, false, 3);

/// Card processor fixed fee in cents, charged even on a zero subtotal
pub const STRIPE_FIXED_FEE: Cents = 30;

/// Splits a booking subtotal into platform fee, processor fee, payout and deposit.
///
/// Pure and deterministic; the rate table is injected from configuration.
#[derive(Debug, Clone, Default)]
pub struct FeeCalculator {
    rates: TierRateTable,
}

impl FeeCalculator {
    pub fn new(rates: TierRateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &TierRateTable {
        &self.rates
    }

    /// `round(amount × rate(tier))`
    pub fn calculate_platform_fee(&self, amount: Cents, tier: PricingTier) -> Result<Cents> {
        ensure_non_negative(amount, "amount")?;
        apply_rate(amount, self.rates.rate(tier))
    }

    /// Platform fee as presented to the payment processor
    pub fn calculate_application_fee(&self, amount: Cents, tier: PricingTier) -> Result<Cents> {
        self.calculate_platform_fee(amount, tier)
    }

    /// `round(amount × 0.029) + 30`
    pub fn calculate_stripe_fee(&self, amount: Cents) -> Result<Cents> {
        ensure_non_negative(amount, "amount")?;
        Ok(apply_rate(amount, STRIPE_PERCENTAGE_FEE)? + STRIPE_FIXED_FEE)
    }

    /// Full breakdown for a booking.
    ///
    /// Fees are always computed on the full subtotal. A deposit is only produced
    /// for a percentage in `(0, 100]`; anything else leaves `deposit_amount` empty.
    pub fn calculate_payment(
        &self,
        subtotal: Cents,
        tier: PricingTier,
        deposit_percentage: Option<Decimal>,
    ) -> Result<PaymentCalculation> {
        let platform_fee = self.calculate_platform_fee(subtotal, tier)?;
        let stripe_fee = self.calculate_stripe_fee(subtotal)?;

        let total = subtotal;
        let tenant_receives = total - platform_fee - stripe_fee;

        let deposit_amount = match deposit_percentage {
            Some(pct) if pct > Decimal::ZERO && pct <= Decimal::ONE_HUNDRED => {
                Some(apply_rate(total, pct / Decimal::ONE_HUNDRED)?)
            }
            Some(pct) if pct != Decimal::ZERO => {
                warn!(deposit_percentage = %pct, "Ignoring deposit percentage outside (0, 100]");
                None
            }
            _ => None,
        };

        let calculation = PaymentCalculation {
            subtotal,
            platform_fee,
            stripe_fee,
            total,
            tenant_receives,
            deposit_amount,
        };

        if calculation.is_underpriced() {
            warn!(
                subtotal,
                tier = %tier,
                tenant_receives,
                "Booking subtotal does not cover platform and processor fees"
            );
        }

        Ok(calculation)
    }

    pub fn platform_fee_config(&self, tier: PricingTier) -> PlatformFeeConfig {
        self.rates.config(tier)
    }
}

/// Formats cents for display, e.g. `format_currency(100000, "USD") == "$1,000.00"`
pub fn format_currency(cents: Cents, currency_code: &str) -> Result<String> {
    let currency: Currency = currency_code.parse()?;
    Ok(currency.format_cents(cents))
}
