//! Amount formatting for totals and reports.

use rust_decimal::{Decimal, RoundingStrategy};

pub const DEFAULT_CURRENCY_PREFIX: &str = "RM";
const MINOR_UNITS: u32 = 2;

/// Rounds to two decimals, half away from zero, with exactly two digits of
/// scale so `12.5` renders as `12.50`.
pub fn to_minor_units(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(MINOR_UNITS, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    rounded.rescale(MINOR_UNITS);
    rounded
}

/// Report form: prefix plus two decimals, no grouping (`RM1234.50`).
pub fn format_plain(prefix: &str, amount: Decimal) -> String {
    format!("{}{}", prefix, to_minor_units(amount))
}

/// Display form: prefix plus grouped two-decimal number (`RM1,234.50`).
pub fn format_display(prefix: &str, amount: Decimal) -> String {
    let rounded = to_minor_units(amount);
    let body = to_minor_units(rounded.abs()).to_string();
    let (int_part, frac_part) = body.split_once('.').unwrap_or((body.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}{}.{}", sign, prefix, group_digits(int_part, ','), frac_part)
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
