//! Display formatting for amounts.
//!
//! Amounts are grouped with `,` separators and shown with at most two
//! fractional digits. The default grouping is the Indian system (the last
//! three digits, then pairs: `12,34,567`); international grouping (threes)
//! is available for other front ends. Currency symbols are left to callers.

use rust_decimal::Decimal;

use crate::calculations::common::round_half_up;
use crate::calculations::try_parse_income;

/// Fractional digits never exceed this, whatever the caller asks for.
pub const MAX_FRACTION_DIGITS: u32 = 2;

const LAKH: i64 = 100_000;
const CRORE: i64 = 10_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DigitGrouping {
    /// `12,34,567`
    #[default]
    Indian,
    /// `1,234,567`
    International,
}

/// Formats an amount with Indian grouping.
///
/// `min_fraction_digits` pads the fraction with zeros and defaults to none;
/// at most two fractional digits are ever shown, rounding half away from
/// zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format::format_amount;
///
/// assert_eq!(format_amount(dec!(1234567), None), "12,34,567");
/// assert_eq!(format_amount(dec!(617.255), None), "617.26");
/// assert_eq!(format_amount(dec!(3800), Some(2)), "3,800.00");
/// ```
pub fn format_amount(
    value: Decimal,
    min_fraction_digits: Option<u32>,
) -> String {
    format_amount_with(value, min_fraction_digits, DigitGrouping::Indian)
}

/// Formats an amount with the given digit grouping.
pub fn format_amount_with(
    value: Decimal,
    min_fraction_digits: Option<u32>,
    grouping: DigitGrouping,
) -> String {
    let min_fraction_digits = min_fraction_digits
        .unwrap_or(0)
        .min(MAX_FRACTION_DIGITS) as usize;

    let rounded = round_half_up(value).normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (integer_part, fraction_part) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

    let mut formatted = String::with_capacity(digits.len() + 8);
    if negative {
        formatted.push('-');
    }
    formatted.push_str(&group_digits(integer_part, grouping));

    if !fraction_part.is_empty() || min_fraction_digits > 0 {
        formatted.push('.');
        formatted.push_str(fraction_part);
        for _ in fraction_part.len()..min_fraction_digits {
            formatted.push('0');
        }
    }
    formatted
}

/// Re-renders typed income with grouping, as a form field would while the
/// user types (`"1000000"` becomes `"10,00,000"`).
///
/// Input with no leading number renders as an empty string.
pub fn format_income_input(text: &str) -> String {
    try_parse_income(text)
        .map(|income| format_amount(Decimal::from(income), None))
        .unwrap_or_default()
}

/// Short label in Indian units: `12 Lakh`, `1.5 Crore`.
///
/// Amounts under one lakh are formatted in full.
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::format::lakh_label;
///
/// assert_eq!(lakh_label(dec!(1200000)), "12 Lakh");
/// assert_eq!(lakh_label(dec!(25000000)), "2.5 Crore");
/// ```
pub fn lakh_label(amount: Decimal) -> String {
    let magnitude = amount.abs();
    if magnitude >= Decimal::from(CRORE) {
        format!("{} Crore", format_amount(amount / Decimal::from(CRORE), None))
    } else if magnitude >= Decimal::from(LAKH) {
        format!("{} Lakh", format_amount(amount / Decimal::from(LAKH), None))
    } else {
        format_amount(amount, None)
    }
}

fn group_digits(
    integer_part: &str,
    grouping: DigitGrouping,
) -> String {
    // Integer part of a Decimal's string form is ASCII digits only.
    let len = integer_part.len();
    if len <= 3 {
        return integer_part.to_string();
    }

    let (head, tail) = integer_part.split_at(len - 3);
    let group = match grouping {
        DigitGrouping::Indian => 2,
        DigitGrouping::International => 3,
    };

    let mut groups = Vec::with_capacity(head.len() / group + 2);
    let first = head.len() % group;
    if first > 0 {
        groups.push(&head[..first]);
    }
    groups.extend(
        head.as_bytes()[first..]
            .chunks(group)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok()),
    );
    groups.push(tail);
    groups.join(",")
}
