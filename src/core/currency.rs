use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::AppError;

/// Currencies the dashboard can display, with their en-US symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    MXN,
}

impl Currency {
    /// Symbol used by en-US number formatting for this currency
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
            Currency::MXN => "MX$",
        }
    }

    /// Formats an amount in minor units (cents) as `$1,234.56`.
    ///
    /// Negative amounts carry a leading minus before the symbol (`-$5.00`).
    pub fn format_cents(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        let major = abs / 100;
        let minor = abs % 100;

        format!("{}{}{}.{:02}", sign, self.symbol(), group_thousands(major), minor)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
            Currency::GBP => write!(f, "GBP"),
            Currency::CAD => write!(f, "CAD"),
            Currency::AUD => write!(f, "AUD"),
            Currency::MXN => write!(f, "MXN"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "CAD" => Ok(Currency::CAD),
            "AUD" => Ok(Currency::AUD),
            "MXN" => Ok(Currency::MXN),
            _ => Err(AppError::invalid_argument(format!(
                "Unsupported currency: {}",
                s
            ))),
        }
    }
}

impl TryFrom<&str> for Currency {
    type Error = AppError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
