//! French-locale display formatting for amounts and rates.
//!
//! Companion helpers for the storefront UI, not part of the calculation
//! contract. Grouping uses the narrow no-break space and the decimal
//! separator is a comma, matching fr-FR conventions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Narrow no-break space used as the fr-FR thousands separator.
const GROUP_SEP: char = '\u{202f}';
/// No-break space between the number and the currency symbol or percent sign.
const UNIT_SEP: char = '\u{a0}';

/// Format an amount in minor units as a French-locale currency string,
/// e.g. `format_currency(123456, "EUR")` → `"1 234,56 €"`.
pub fn format_currency(minor_units: i64, currency_code: &str) -> String {
    let exponent = currency_exponent(currency_code);
    let scale = 10_i64.pow(exponent);

    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    let major = abs / scale.unsigned_abs();
    let minor = abs % scale.unsigned_abs();

    let grouped = group_thousands(major);
    let symbol = currency_symbol(currency_code);

    if exponent == 0 {
        format!("{sign}{grouped}{UNIT_SEP}{symbol}")
    } else {
        format!(
            "{sign}{grouped},{minor:0width$}{UNIT_SEP}{symbol}",
            width = exponent as usize
        )
    }
}

/// Format a rate fraction as a whole percentage, e.g. `0.20` → `"20 %"`.
/// Rounds to the nearest whole percent, ties away from zero.
pub fn format_percentage(rate: Decimal) -> String {
    let percent = (rate * Decimal::from(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0);
    format!("{percent}{UNIT_SEP}%")
}

/// Minor-unit digits per ISO 4217 currency. Two for everything the
/// storefront sells in, zero for the common zero-decimal currencies.
fn currency_exponent(currency_code: &str) -> u32 {
    match currency_code {
        "JPY" | "KRW" | "VND" | "ISK" => 0,
        _ => 2,
    }
}

fn currency_symbol(currency_code: &str) -> &str {
    match currency_code {
        "EUR" => "€",
        "USD" => "$US",
        "GBP" => "£GB",
        other => other,
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(GROUP_SEP);
        }
        out.push(c);
    }
    out
}
