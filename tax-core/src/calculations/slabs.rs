//! Progressive slab allocation.
//!
//! Taxable income is poured into the brackets from the bottom up. Each
//! bracket takes at most its own width, taxes that portion at its rate and
//! passes the rest upward. The open-ended top bracket is closed at the
//! taxable income itself.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tax_core::RegimeConfig;
//! use tax_core::calculations::allocate_slabs;
//!
//! let config = RegimeConfig::default();
//! let slabs = allocate_slabs(dec!(925000), &config.slabs);
//!
//! // The 0% band contributes nothing and is left out.
//! assert_eq!(slabs.len(), 2);
//! assert_eq!(slabs[0].taxed_amount, dec!(20000));
//! assert_eq!(slabs[1].taxed_amount, dec!(12500));
//! // Income stops inside the 10% band, so its range ends at the income.
//! assert_eq!(slabs[1].range_end, dec!(925000));
//! ```

use rust_decimal::Decimal;

use crate::calculations::common::{max, percent_of};
use crate::{SlabBracket, TaxSlab};

/// Walks every bracket and returns one entry per bracket, including those
/// that contributed nothing.
///
/// The taxed amounts of the returned entries always sum to the gross tax.
pub fn slab_allocations(
    taxable_income: Decimal,
    brackets: &[SlabBracket],
) -> Vec<TaxSlab> {
    let mut remaining_income = taxable_income;
    let mut previous_limit = Decimal::ZERO;

    brackets
        .iter()
        .map(|bracket| {
            // An unreached open bracket collapses to its own start.
            let limit = bracket
                .max_income
                .unwrap_or_else(|| max(taxable_income, bracket.min_income));
            let width = limit - previous_limit;

            let taxable_amount = max(Decimal::ZERO, remaining_income.min(width));
            let taxed_amount = percent_of(taxable_amount, bracket.rate_percent);

            // Only the bracket the income stops inside ends at the income.
            let range_end = if taxable_amount > Decimal::ZERO && taxable_amount < width {
                taxable_income
            } else {
                limit
            };

            remaining_income -= taxable_amount;
            previous_limit = limit;

            TaxSlab {
                range_start: bracket.min_income,
                range_end,
                rate_percent: bracket.rate_percent,
                taxable_amount,
                taxed_amount,
            }
        })
        .collect()
}

/// Brackets that contributed tax, lowest first.
pub fn allocate_slabs(
    taxable_income: Decimal,
    brackets: &[SlabBracket],
) -> Vec<TaxSlab> {
    slab_allocations(taxable_income, brackets)
        .into_iter()
        .filter(|slab| slab.taxed_amount > Decimal::ZERO)
        .collect()
}
