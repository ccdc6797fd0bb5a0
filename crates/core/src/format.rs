//! Number and currency formatting

use rust_decimal::Decimal;
use rusty_money::{
    Formatter, Money, Params,
    iso::{Currency, INR},
};

/// Groups of three: `1,234,567`.
const THOUSANDS: &[usize] = &[3, 3, 3, 3, 3, 3];

/// Last three digits, then groups of two: `12,34,567`.
const LAKHS: &[usize] = &[3, 2, 2, 2, 2, 2, 2, 2, 2];

/// Storefront currency.
pub fn store_currency() -> &'static Currency {
    INR
}

fn format_whole(amount: u64, separator_pattern: &[usize], symbol: Option<&'static str>) -> String {
    let money = Money::from_decimal(Decimal::from(amount), store_currency());

    Formatter::money(
        &money,
        Params {
            separator_pattern,
            rounding: Some(0),
            symbol,
            ..Params::default()
        },
    )
}

/// Locale-grouped number as shown on course cards (`8,750`).
pub fn format_count(value: u64) -> String {
    format_whole(value, THOUSANDS, None)
}

/// Whole-rupee price as shown on course cards (`₹1,499`).
pub fn format_card_price(amount: u64) -> String {
    format_whole(amount, THOUSANDS, Some(store_currency().symbol))
}

/// Whole-rupee amount in `en-IN` currency style with no fraction digits
/// (`₹1,00,000`).
pub fn format_currency(amount: u64) -> String {
    format_whole(amount, LAKHS, Some(store_currency().symbol))
}
