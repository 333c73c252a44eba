// Unit tests for display formatting of cent amounts

use proptest::prelude::*;
use rentfee::core::Currency;
use rentfee::modules::fees::format_currency;

#[test]
fn test_usd_formatting() {
    assert_eq!(format_currency(0, "USD").unwrap(), "$0.00");
    assert_eq!(format_currency(5, "USD").unwrap(), "$0.05");
    assert_eq!(format_currency(18190, "USD").unwrap(), "$181.90");
    assert_eq!(format_currency(100000, "USD").unwrap(), "$1,000.00");
    assert_eq!(format_currency(123456789, "USD").unwrap(), "$1,234,567.89");
}

#[test]
fn test_negative_amounts_keep_sign() {
    assert_eq!(format_currency(-30, "USD").unwrap(), "-$0.30");
    assert_eq!(format_currency(-250000, "USD").unwrap(), "-$2,500.00");
}

#[test]
fn test_other_currencies() {
    assert_eq!(format_currency(100000, "eur").unwrap(), "€1,000.00");
    assert_eq!(format_currency(4999, "GBP").unwrap(), "£49.99");
    assert_eq!(format_currency(4999, "CAD").unwrap(), "CA$49.99");
}

#[test]
fn test_unsupported_currency() {
    let err = format_currency(100, "BTC").unwrap_err();
    assert!(err.to_string().contains("Unsupported currency"));
}

#[test]
fn test_default_currency_is_usd() {
    assert_eq!(Currency::default(), Currency::USD);
}

proptest! {
    /// Property: stripping symbol and separators gives back the cent amount
    #[test]
    fn prop_formatting_preserves_value(cents in 0i64..1_000_000_000_000i64) {
        let formatted = Currency::USD.format_cents(cents);
        prop_assert!(formatted.starts_with('$'));

        let digits: String = formatted.chars().filter(|c| c.is_ascii_digit()).collect();
        prop_assert_eq!(digits.parse::<i64>().unwrap(), cents);

        let (_, minor) = formatted.rsplit_once('.').unwrap();
        prop_assert_eq!(minor.len(), 2);
    }
}
