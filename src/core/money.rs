use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{AppError, Result};

/// Amount in minor currency units
pub type Cents = i64;

/// Rejects negative amounts before any fee arithmetic
pub fn ensure_non_negative(amount: Cents, field: &str) -> Result<()> {
    if amount < 0 {
        return Err(AppError::invalid_argument(format!(
            "{} cannot be negative, got {}",
            field, amount
        )));
    }
    Ok(())
}

/// `round(amount × factor)` to whole cents, half-up.
///
/// This is the single multiply-then-round step allowed on currency values.
pub fn apply_rate(amount: Cents, factor: Decimal) -> Result<Cents> {
    (Decimal::from(amount) * factor)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| AppError::invalid_argument(format!("Amount out of range: {}", amount)))
}

/// `a + b`, failing instead of wrapping.
///
/// Totals come straight from upstream booking documents, so an overflow is
/// reported as bad upstream data.
pub fn add_cents(a: Cents, b: Cents) -> Result<Cents> {
    a.checked_add(b)
        .ok_or_else(|| AppError::upstream("Booking totals exceed the representable amount"))
}

/// Checked sum of amounts
pub fn sum_cents(amounts: impl IntoIterator<Item = Cents>) -> Result<Cents> {
    amounts.into_iter().try_fold(0, add_cents)
}

/// Percentage change of `current` against `previous`; zero when there is no baseline
pub fn percentage_change(current: i64, previous: i64) -> f64 {
    if previous > 0 {
        (current as f64 - previous as f64) / previous as f64 * 100.0
    } else {
        0.0
    }
}

/// Rounds a display ratio to `places` decimals
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
