//! Income parsing and the standard deduction.
//!
//! Income arrives as whatever the user typed. Parsing is fail-soft: partial
//! or malformed input is normal while a form is being filled in, so it maps
//! to zero income instead of an error.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use tracing::{debug, warn};

static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").expect("leading integer pattern is valid"));

/// Trims whitespace and removes `,` grouping separators.
fn normalize_income_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses the leading integer of `s` after removing grouping separators.
///
/// Anything after the leading digits (a fractional part, a unit) is ignored.
/// Returns `None` when there are no leading digits or the value does not fit
/// in an `i64`.
///
/// ```
/// use tax_core::calculations::try_parse_income;
///
/// assert_eq!(try_parse_income("12,50,000"), Some(1_250_000));
/// assert_eq!(try_parse_income("1000.75"), Some(1000));
/// assert_eq!(try_parse_income("abc"), None);
/// ```
pub fn try_parse_income(s: &str) -> Option<i64> {
    let normalized = normalize_income_input(s);
    LEADING_INTEGER
        .find(&normalized)
        .and_then(|m| m.as_str().parse().ok())
}

/// Parses free-form income text, treating anything unparsable as zero.
///
/// Empty input is silently zero; non-empty input that cannot be read logs a
/// warning.
pub fn parse_income(s: &str) -> i64 {
    match try_parse_income(s) {
        Some(income) => income,
        None => {
            if !s.trim().is_empty() {
                warn!(input = %s, "income is not a number; treating as zero");
            }
            0
        }
    }
}

/// Applies the standard deduction when elected.
///
/// Returns `(taxable_income, deduction_applied)`. The taxable income is not
/// clamped: a deduction larger than the income gives a negative value, which
/// the slab walk turns into zero tax.
pub fn taxable_income(
    income: Decimal,
    apply_standard_deduction: bool,
    standard_deduction: Decimal,
) -> (Decimal, Decimal) {
    let deduction = if apply_standard_deduction {
        standard_deduction
    } else {
        Decimal::ZERO
    };
    let taxable = income - deduction;

    if taxable < Decimal::ZERO {
        debug!(
            income = %income,
            deduction = %deduction,
            taxable = %taxable,
            "deduction exceeds income; taxable income is negative"
        );
    }

    (taxable, deduction)
}
